use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use lib::guarded::Guarded;

const TICKS: u64 = 12;
const PRODUCE_EVERY: Duration = Duration::from_millis(150);
const CONSUME_EVERY: Duration = Duration::from_millis(100);

fn main() {
    let shared = Arc::new(Guarded::new_lock(BTreeMap::new()));
    // The key counter is its own piece of shared state, handed to the
    // producer explicitly.
    let next_key = Arc::new(AtomicU64::new(0));

    let producer = thread::spawn({
        let shared = Arc::clone(&shared);
        let next_key = Arc::clone(&next_key);
        move || {
            for _ in 0..TICKS {
                let key = next_key.fetch_add(1, Ordering::SeqCst).to_string();
                shared.write().insert(key, "foo".to_string());
                thread::sleep(PRODUCE_EVERY);
            }
        }
    });

    let consumer = thread::spawn({
        let shared = Arc::clone(&shared);
        move || {
            for _ in 0..TICKS {
                {
                    let entries = shared.read();
                    println!("--- {} entries ---", entries.len());
                    for (key, value) in entries.iter() {
                        println!("{key} => {value}");
                    }
                }

                if let Some((key, _)) = shared.write().pop_first() {
                    println!("consumed {key}");
                }

                thread::sleep(CONSUME_EVERY);
            }
        }
    });

    producer.join().unwrap();
    consumer.join().unwrap();

    println!("left over: {:?}", *shared.read());
}
