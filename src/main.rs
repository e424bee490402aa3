use cgi_static::{logger, serve, Request, Settings};
use std::io;

fn main() {
    let settings = Settings::load_or_default();

    if let Err(e) = logger::init(&settings.logging) {
        logger::log_warning(&format!("Failed to open log files, using stderr: {e}"));
    }

    let request = Request::from_env();
    serve(request, &settings, io::stdout().lock());
}
