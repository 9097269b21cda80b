//! Drives the interactive menu with scripted input.

mod common;

use std::io::Cursor;

use common::TestHarness;
use gallery::images::NewImage;
use gallery::shell::{write_summary, Shell};

fn run_script(h: &TestHarness, script: &str) -> String {
    let mut output = Vec::new();
    Shell::new(&h.accounts, &h.images, Cursor::new(script.to_string()), &mut output)
        .run()
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn register_and_exit() {
    let h = TestHarness::new();

    let out = run_script(&h, "1\nalice\npw1\n3\n");
    assert!(out.contains("User registered successfully!"));
    assert!(out.contains("Goodbye!"));
    assert!(h.accounts.authenticate("alice", "pw1").unwrap());
}

#[test]
fn invalid_choice_reprompts() {
    let h = TestHarness::new();

    let out = run_script(&h, "9\nabc\n3\n");
    assert_eq!(out.matches("Invalid choice. Please try again.").count(), 2);
    assert!(out.contains("Goodbye!"));
}

#[test]
fn bad_login_returns_to_menu() {
    let h = TestHarness::new();
    h.accounts.register("alice", "pw1").unwrap();

    let out = run_script(&h, "2\nalice\nwrong\n3\n");
    assert!(out.contains("Invalid username or password."));
    assert!(!out.contains("Upload Image"));
}

#[test]
fn upload_binds_to_logged_in_user() {
    let h = TestHarness::new();
    h.accounts.register("alice", "pw1").unwrap();
    let bob = h.accounts.register("bob", "pw2").unwrap();
    let source = h.write_file("cat.png", b"meow");

    let script = format!("2\nbob\npw2\n1\n{}\na cat\n4\n3\n", source.display());
    let out = run_script(&h, &script);
    assert!(out.contains("Login successful!"));
    assert!(out.contains("Image uploaded successfully!"));

    let listed = h.images.list_all().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].user_id, bob.id);
    assert_eq!(listed[0].description, "a cat");
}

#[test]
fn view_and_download() {
    let h = TestHarness::new();
    let alice = h.accounts.register("alice", "pw1").unwrap();
    let source = h.write_file("dog.jpg", &[1, 2, 3]);
    let id = h
        .images
        .upload(&NewImage::new(alice.id, &source, "a dog"))
        .unwrap();
    let output = h.path("saved.jpg");

    let script = format!(
        "2\nalice\npw1\n2\n3\n{}\n{}\n4\n3\n",
        id,
        output.display()
    );
    let out = run_script(&h, &script);

    assert!(out.contains(&format!("Image ID: {}", id)));
    assert!(out.contains(&format!("Image Name: {}", source.display())));
    assert!(out.contains("Description: a dog"));
    assert!(out.contains("Image downloaded successfully at:"));
    assert_eq!(std::fs::read(&output).unwrap(), vec![1, 2, 3]);
}

#[test]
fn errors_are_reported_and_menu_continues() {
    let h = TestHarness::new();
    h.accounts.register("alice", "pw1").unwrap();
    let missing = h.path("missing.png");
    let output = h.path("never.png");

    let script = format!(
        "2\nalice\npw1\n1\n{}\n\n3\n99\n{}\n3\nnot-a-number\n2\n4\n3\n",
        missing.display(),
        output.display()
    );
    let out = run_script(&h, &script);

    assert!(out.contains("Error uploading image: File not found"));
    assert!(out.contains("No image found with ID: 99"));
    assert!(out.contains("Invalid image ID: not-a-number"));
    assert!(out.contains("No images found."));
    assert!(out.contains("Goodbye!"));
    assert!(!output.exists());
}

#[test]
fn end_of_input_exits_cleanly() {
    let h = TestHarness::new();

    let out = run_script(&h, "");
    assert!(out.ends_with("Choose an option: "));

    // Input ending mid-dashboard also ends the session without error
    h.accounts.register("alice", "pw1").unwrap();
    let out = run_script(&h, "2\nalice\npw1\n");
    assert!(out.contains("Login successful!"));
}

#[test]
fn summary_block_matches_menu_listing() {
    let h = TestHarness::new();
    let user = h.accounts.register("alice", "pw1").unwrap();
    let source = h.write_file("a.png", b"png");
    h.images
        .upload(&NewImage::new(user.id, &source, "first"))
        .unwrap();

    let summary = h.images.list_all().unwrap().remove(0);
    let mut block = Vec::new();
    write_summary(&mut block, &summary).unwrap();
    let block = String::from_utf8(block).unwrap();

    let lines: Vec<&str> = block.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], format!("Image ID: {}", summary.id));
    assert_eq!(lines[1], format!("Image Name: {}", source.display()));
    assert_eq!(lines[2], "Description: first");
    assert!(lines[3].starts_with("Upload Date: "));
    assert!(lines[4].starts_with("---"));

    let out = run_script(&h, "2\nalice\npw1\n2\n4\n3\n");
    assert!(out.contains(&block));
}
