use clap::Parser;
use rlsignal_trips::{app::TripsApp, trips::TripsError};

fn main() -> Result<(), TripsError> {
    env_logger::init();
    log::debug!("cwd: {:?}", std::env::current_dir());
    let args = TripsApp::parse();
    args.op.run()
}
