// build.rs

use clap::{Arg, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("pkgstate")
        .version(env!("CARGO_PKG_VERSION"))
        .author("pkgstate Contributors")
        .about("Package installation state registry")
        .subcommand_required(true)
        .arg(
            Arg::new("root")
                .short('r')
                .long("root")
                .value_name("DIR")
                .default_value("/")
                .global(true)
                .help("Root directory holding the registry"),
        )
        .subcommand(
            Command::new("set-state")
                .about("Record a new state for a package")
                .arg(Arg::new("pkgname").required(true).help("Package name"))
                .arg(
                    Arg::new("state")
                        .required(true)
                        .value_parser([
                            "unpacked",
                            "installed",
                            "broken",
                            "config-files",
                            "not-installed",
                            "half-unpacked",
                        ])
                        .help("New state"),
                )
                .arg(
                    Arg::new("pkg_version")
                        .long("pkg-version")
                        .value_name("VERSION")
                        .help("Package version, stored only for packages new to the registry"),
                )
                .arg(
                    Arg::new("pkgver")
                        .long("pkgver")
                        .value_name("PKGVER")
                        .help("Canonical name-version string"),
                ),
        )
        .subcommand(
            Command::new("state")
                .about("Show the state of an installed package")
                .arg(Arg::new("pkgname").required(true).help("Package name")),
        )
        .subcommand(Command::new("list").about("List all tracked packages and their states"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Render into OUT_DIR so the source tree stays untouched
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("Failed to create man directory");

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();
    man.render(&mut buffer).expect("Failed to render man page");

    let man_path = man_dir.join("pkgstate.1");
    fs::write(&man_path, buffer).expect("Failed to write man page");
}
