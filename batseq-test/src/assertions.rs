//! Custom assertions for testing

use crate::environment::TestEnvironment;

/// Assert the scratch directory holds no staged query files
pub fn assert_no_staged_files(env: &TestEnvironment) {
    let staged = env.staged_files();
    assert!(
        staged.is_empty(),
        "Expected no staged query files, found {}: {:?}",
        staged.len(),
        staged
    );
}

/// Assert that a FASTA content is valid
pub fn assert_valid_fasta(content: &str) {
    let lines: Vec<&str> = content.lines().collect();
    assert!(!lines.is_empty(), "FASTA content is empty");

    let mut has_header = false;
    let mut has_sequence = false;

    for line in lines {
        if let Some(header) = line.strip_prefix('>') {
            assert!(!header.trim().is_empty(), "Empty FASTA header found");
            has_header = true;
        } else if !line.is_empty() {
            assert!(
                line.chars()
                    .all(|c| "ATGCUNRYKMSWBDHV-".contains(c.to_ascii_uppercase())),
                "Invalid sequence character found: {}",
                line
            );
            has_sequence = true;
        }
    }

    assert!(has_header, "No FASTA headers found");
    assert!(has_sequence, "No sequences found");
}

/// Assert a JSON error body of the form `{"error": "..."}` containing `needle`
pub fn assert_error_message(body: &str, needle: &str) {
    assert!(
        body.starts_with("{\"error\":"),
        "Expected an error object, got: {}",
        body
    );
    assert!(
        body.contains(needle),
        "Error body {} does not mention {:?}",
        body,
        needle
    );
}
