use std::process;

use contacts_httpd as httpd;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = parse_options()?;

    httpd::logger::init().expect("Global logger hasn't already been set");

    tracing::info!("version {}", env!("CARGO_PKG_VERSION"));

    match httpd::run(options).await {
        Ok(()) => {}
        Err(err) => {
            tracing::error!("Fatal: {:#}", err);
            process::exit(1);
        }
    }
    Ok(())
}

/// Parse command-line arguments into HTTP options.
fn parse_options() -> Result<httpd::Options, lexopt::Error> {
    use lexopt::prelude::*;

    let mut parser = lexopt::Parser::from_env();
    let mut options = httpd::Options::default();

    while let Some(arg) = parser.next()? {
        match arg {
            Long("listen") => {
                options.listen = parser.value()?.parse()?;
            }
            Long("assets") => {
                options.assets = Some(parser.value()?.into());
            }
            Long("help") | Short('h') => {
                println!("usage: contacts-httpd [--listen <addr>] [--assets <dir>]");
                process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }
    Ok(options)
}
