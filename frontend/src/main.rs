fn main() {
    flores_frontend::run();
}
