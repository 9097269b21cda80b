//! Interactive menu over the account and image repositories.
//!
//! The shell borrows repositories built by the caller and talks to any
//! `BufRead`/`Write` pair, so it runs the same on a terminal and in tests.
//! Repository failures are printed and the menu is shown again; only a
//! failure to write to the output ends the session early.

use std::io::{self, BufRead, Write};
use std::path::Path;

use gallery_common::ImageId;
use gallery_db::models::{ImageSummary, User};

use crate::accounts::AccountRepository;
use crate::images::{Download, ImageRepository, NewImage};

const SEPARATOR: &str = "---------------------------";

/// Print one listing entry followed by a separator line.
pub fn write_summary<W: Write>(out: &mut W, image: &ImageSummary) -> io::Result<()> {
    writeln!(out, "Image ID: {}", image.id)?;
    writeln!(out, "Image Name: {}", image.name)?;
    writeln!(out, "Description: {}", image.description)?;
    writeln!(
        out,
        "Upload Date: {}",
        image.upload_date.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "{}", SEPARATOR)
}

/// What to do after handling one menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Logout,
    Quit,
}

/// A menu-driven session.
pub struct Shell<'a, R, W> {
    accounts: &'a AccountRepository,
    images: &'a ImageRepository,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(
        accounts: &'a AccountRepository,
        images: &'a ImageRepository,
        input: R,
        output: W,
    ) -> Self {
        Self {
            accounts,
            images,
            input,
            output,
        }
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "1. Register")?;
            writeln!(self.output, "2. Login")?;
            writeln!(self.output, "3. Exit")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };

            let flow = match choice.trim() {
                "1" => self.register()?,
                "2" => self.login()?,
                "3" => Flow::Quit,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                writeln!(self.output, "Goodbye!")?;
                return Ok(());
            }
        }
    }

    fn register(&mut self) -> io::Result<Flow> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(Flow::Quit);
        };

        match self.accounts.register(&username, &password) {
            Ok(_) => writeln!(self.output, "User registered successfully!")?,
            Err(e) => {
                tracing::error!("Failed to register user: {}", e);
                writeln!(self.output, "Error registering user: {}", e)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> io::Result<Flow> {
        let Some(username) = self.prompt("Enter username: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(password) = self.prompt("Enter password: ")? else {
            return Ok(Flow::Quit);
        };

        match self.accounts.login(&username, &password) {
            Ok(Some(user)) => {
                writeln!(self.output, "Login successful!")?;
                self.dashboard(&user)
            }
            Ok(None) => {
                writeln!(self.output, "Invalid username or password.")?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                tracing::error!("Login failed: {}", e);
                writeln!(self.output, "Error during login: {}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Menu for a logged-in user. Uploads are recorded under `user.id`.
    fn dashboard(&mut self, user: &User) -> io::Result<Flow> {
        loop {
            writeln!(self.output, "1. Upload Image")?;
            writeln!(self.output, "2. View Images")?;
            writeln!(self.output, "3. Download Image")?;
            writeln!(self.output, "4. Logout")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(Flow::Quit);
            };

            let flow = match choice.trim() {
                "1" => self.upload(user)?,
                "2" => self.view()?,
                "3" => self.download()?,
                "4" => Flow::Logout,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            match flow {
                Flow::Continue => {}
                Flow::Logout => return Ok(Flow::Continue),
                Flow::Quit => return Ok(Flow::Quit),
            }
        }
    }

    fn upload(&mut self, user: &User) -> io::Result<Flow> {
        let Some(path) = self.prompt("Enter image file path: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(description) = self.prompt("Enter image description: ")? else {
            return Ok(Flow::Quit);
        };

        let image = NewImage::new(user.id, path, description);
        match self.images.upload(&image) {
            Ok(id) => writeln!(self.output, "Image uploaded successfully! (ID: {})", id)?,
            Err(e) => {
                tracing::error!("Failed to upload image: {}", e);
                writeln!(self.output, "Error uploading image: {}", e)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn view(&mut self) -> io::Result<Flow> {
        match self.images.list_all() {
            Ok(images) if images.is_empty() => writeln!(self.output, "No images found.")?,
            Ok(images) => {
                for image in &images {
                    write_summary(&mut self.output, image)?;
                }
            }
            Err(e) => {
                tracing::error!("Failed to list images: {}", e);
                writeln!(self.output, "Error retrieving images: {}", e)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn download(&mut self) -> io::Result<Flow> {
        let Some(raw_id) = self.prompt("Enter the image ID to download: ")? else {
            return Ok(Flow::Quit);
        };
        let Ok(id) = raw_id.parse::<ImageId>() else {
            writeln!(self.output, "Invalid image ID: {}", raw_id.trim())?;
            return Ok(Flow::Continue);
        };
        let Some(output_path) = self.prompt("Enter the file path to save the image: ")? else {
            return Ok(Flow::Quit);
        };

        match self.images.download(id, Path::new(&output_path)) {
            Ok(Download::Saved { .. }) => writeln!(
                self.output,
                "Image downloaded successfully at: {}",
                output_path
            )?,
            Ok(Download::Missing) => writeln!(self.output, "No image found with ID: {}", id)?,
            Err(e) => {
                tracing::error!("Failed to download image {}: {}", id, e);
                writeln!(self.output, "Error downloading image: {}", e)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Print `label` and read one line. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
