fn main() {
    if let Err(err) = vat_recon::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
