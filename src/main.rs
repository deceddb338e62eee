use starstream::Simulation;

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = Simulation::new().run() {
        tracing::error!(error = %e, "starstream exited with an error");
        std::process::exit(1);
    }
}
