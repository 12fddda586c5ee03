//! Version command

/// Run the version command.
pub fn run() {
    println!("scaleover {}", env!("CARGO_PKG_VERSION"));
}
