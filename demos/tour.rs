use std::collections::BTreeMap;

use lib::guarded::Guarded;

#[derive(Debug, Default)]
struct Telemetry {
    samples: Vec<u8>,
    coefficient: f32,
}

fn main() {
    // A collection behind the lock backend. Accessor methods pass straight
    // through to the wrapped value.
    let log = Guarded::new_lock(Vec::new());
    {
        let mut entries = log.write();
        entries.push("first".to_string());
        entries.push("second".to_string());
    }

    if let Some(entries) = log.try_read() {
        for (idx, line) in entries.iter().enumerate() {
            println!("log[{idx}] = {line}");
        }
    }

    // In-place rewrite of a whole value through the CAS backend.
    let label = Guarded::new_cas(String::from("draft"));
    *label.write() = String::from("final");
    println!("label = {}", *label.read());

    // Wrapping something pointer-like keeps the extra indirection explicit:
    // one star reaches the box, two stars the pointee.
    let telemetry = Guarded::new_lock(Box::new(Telemetry::default()));
    {
        let mut slot = telemetry.write();
        (**slot).samples = vec![1, 2, 3];
        (**slot).coefficient = 0.5;
    }
    {
        let mut slot = telemetry.write();
        *slot = Box::new(Telemetry {
            samples: vec![9],
            coefficient: 2.0,
        });
    }
    println!("telemetry = {:?}", **telemetry.read());

    let registry = Guarded::new_lock(BTreeMap::new());
    {
        let mut entries = registry.write();
        entries.insert("alpha".to_string(), 1u64);
        entries.insert("beta".to_string(), 2u64);
    }
    {
        let entries = registry.read();
        if let Some(value) = entries.get("alpha") {
            println!("alpha = {value}");
        }
    }

    println!("registry = {registry:?}");
}
