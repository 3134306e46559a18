use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("linkpeek")
        .version("0.1.0")
        .author("Linkpeek Contributors")
        .about("Look up remote URL metadata")
        .arg(clap::arg!(<URL> "URL to look up (absolute, http or https)"))
        .arg(
            clap::arg!(--timeout <SECS> "HTTP timeout in seconds")
                .default_value("10"),
        )
        .arg(
            clap::arg!(--max_bytes <BYTES> "Response-size cap in bytes")
                .default_value("153600"),
        )
        .arg(clap::arg!(-H --header <HEADER> "Extra request header (name:value), repeatable"))
        .arg(clap::arg!(--json "Print the full metadata record as JSON"))
        .arg(clap::arg!(-v --verbose "Print progress information"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "linkpeek", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "linkpeek", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "linkpeek", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "linkpeek", &completions_dir).unwrap();
}
