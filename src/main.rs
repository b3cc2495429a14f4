fn main() {
    if let Err(err) = annocat::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
