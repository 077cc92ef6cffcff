//! Round trips against a live server on the default port.
//!
//! Start a Redis-compatible server locally, then:
//! `cargo run --example basic_usage`

use redpipe::Client;
use redpipe::Command;

fn main() -> Result<(), Box<dyn std::error::Error>> {
	telemetry::init("debug")?;

	let mut client = Client::connect("127.0.0.1:6379")?;

	let pong = client.execute(&Command::new("PING"))?;
	println!("PING -> {:?}", pong);

	client.execute(&Command::new("SET").arg("greeting").arg("hello"))?;
	let greeting = client.execute(&Command::new("GET").arg("greeting"))?;
	println!("GET greeting -> {:?}", greeting.as_str());

	// Three commands, one round trip.
	let commands = vec![
		Command::new("SET").arg("counter").arg(0),
		Command::new("INCR").arg("counter"),
		Command::new("INCR").arg("counter"),
	];
	let values = client.pipeline(&commands)?;
	for (i, value) in values.iter().enumerate() {
		println!("pipeline[{}] -> {:?}", i, value);
	}

	client.close();
	Ok(())
}
