// Include the generated version information
include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Get the application version string for display
pub fn get_version() -> &'static str {
    VERSION
}

pub fn get_git_hash() -> &'static str {
    GIT_HASH
}

pub fn get_build_time() -> &'static str {
    BUILD_TIME
}

/// Print the version block shown by the `version-info` subcommand
pub fn print_header_info() {
    println!("Linked List Service v{}", get_version());
    println!("  Built: {}", get_build_time());
    println!("  Git:   {}", get_git_hash());
}
