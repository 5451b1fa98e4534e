fn main() {
    if let Err(err) = slide_align::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
