//! structconf demo
//!
//! Resolves a small server configuration from tag defaults, `DEMO_*`
//! environment variables and command-line flags, then prints the result
//! as JSON.

use std::process;

use structconf::{new_config_with_merge, FlagSet, JsonCodec, Options, StructConfig};
use tracing_subscriber::EnvFilter;

structconf::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct DemoConfig {
        /// Address to listen on.
        #[tag(r#"name:"demo-addr" usage:"address to listen on" default:"127.0.0.1""#)]
        addr: String,
        #[tag(r#"name:"demo-port" short:"p" usage:"port to listen on" default:"8080""#)]
        port: u16,
        #[tag(r#"name:"demo-workers" short:"w" usage:"worker threads" default:"4""#)]
        workers: u8,
        #[tag(r#"name:"demo-verbose" short:"v" usage:"log every request""#)]
        verbose: bool,
        #[tag(r#"name:"demo-upstreams" usage:"upstream hosts as a JSON array" default:"[]""#)]
        upstreams: Vec<String>,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("STRUCTCONF_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let sc = StructConfig::<DemoConfig>::new(
        Options::new().with_codec::<Vec<String>>(JsonCodec::<Vec<String>>::new()),
    );
    let merger = sc.merger();
    let mut flags = FlagSet::new("structconf-demo");

    let config = match new_config_with_merge(&sc, &merger, &mut flags) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", flags.usage());
            process::exit(2);
        }
    };

    match sc.to_json(&config).and_then(|json| {
        serde_json::to_string_pretty(&json).map_err(|e| structconf::Error::File(e.to_string()))
    }) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
