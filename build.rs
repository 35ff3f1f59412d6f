use std::env;

use regex::Regex;

const DEFAULT_WINDOW_SIZE: &str = "32";

fn main() {
    println!("cargo:rerun-if-env-changed=ACTIVITY_WINDOW_SIZE");
    println!("cargo:rustc-check-cfg=cfg(activity_window, values(\"32\", \"64\", \"128\"))");

    let requested = env::var("ACTIVITY_WINDOW_SIZE").unwrap_or_else(|_| DEFAULT_WINDOW_SIZE.to_string());
    let supported = Regex::new(r"^(32|64|128)$").unwrap();
    let size = requested.trim();
    if !supported.is_match(size) {
        panic!(
            "ACTIVITY_WINDOW_SIZE={requested:?} has no entropy table; supported sizes are 32, 64 and 128"
        );
    }

    println!("cargo:rustc-cfg=activity_window=\"{size}\"");
    println!("cargo:rustc-env=ACTIVITY_WINDOW_SIZE={size}");
}
