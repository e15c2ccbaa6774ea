fn main() {
    if let Err(e) = bulk_import_lib::run() {
        eprintln!("bulk-import: {}", e);
        std::process::exit(1);
    }
}
