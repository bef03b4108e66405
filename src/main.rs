//! Binary entry point for `manifest-patch`.

use std::process;

fn main() {
    if let Err(e) = manifest_patch::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
