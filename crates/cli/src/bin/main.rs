//! Persona binary entry point.

use anyhow::Result;
use clap::Parser;
use persona::App;

fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(app.run());

    // stdin is read on a blocking thread that only returns once the parent
    // writes or closes the pipe, so do not wait for it.
    runtime.shutdown_background();
    result
}
