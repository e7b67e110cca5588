fn main() {
    iridium::cli::run();
}
