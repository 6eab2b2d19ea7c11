//! Heap allocations per operation, by digit count.
//!
//! `VarInt` and the exact double expansion go through `BigInt`, so the
//! interesting question is how allocation grows with the number of digits.
//!
//! ```sh
//! cargo bench --bench alloc
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use vardecimal::Decimal;

struct Tally;

static COUNTING: AtomicBool = AtomicBool::new(false);
static CALLS: AtomicUsize = AtomicUsize::new(0);
static BYTES: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for Tally {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNTING.load(Ordering::Relaxed) {
            CALLS.fetch_add(1, Ordering::Relaxed);
            BYTES.fetch_add(layout.size(), Ordering::Relaxed);
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: Tally = Tally;

/// `(calls, bytes)` allocated while running `op`; its result is dropped
/// after counting stops.
fn tally<T>(op: impl FnOnce() -> T) -> (usize, usize) {
    CALLS.store(0, Ordering::SeqCst);
    BYTES.store(0, Ordering::SeqCst);
    COUNTING.store(true, Ordering::SeqCst);
    let out = op();
    COUNTING.store(false, Ordering::SeqCst);
    drop(out);
    (CALLS.load(Ordering::SeqCst), BYTES.load(Ordering::SeqCst))
}

const DIGIT_COUNTS: [usize; 4] = [2, 16, 128, 1024];

fn literal(digits: usize) -> String {
    let mantissa: String = (0..digits)
        .map(|i| char::from(b'1' + u8::try_from(i % 9).unwrap_or(0)))
        .collect();
    format!("-0.{mantissa}e-40")
}

type Op = fn(&str, &Decimal, &[u8], &[u8]) -> usize;

/// Each operation reports a length so its work cannot be optimized away.
fn operations() -> [(&'static str, Op); 7] {
    [
        ("parse", |text, _, _, _| {
            text.parse::<Decimal>().map_or(0, |d| d.digits().len())
        }),
        ("to_scientific_string", |_, d, _, _| d.to_scientific_string().len()),
        ("encode_comparable", |_, d, _, _| d.encode_comparable().len()),
        ("decode_comparable", |_, _, key, _| {
            Decimal::decode_comparable(key).map_or(0, |(_, used)| used)
        }),
        ("encode_big_decimal", |_, d, _, _| {
            d.encode_big_decimal().map_or(0, |w| w.len())
        }),
        ("decode_big_decimal", |_, _, _, wire| {
            Decimal::decode_big_decimal(wire).map_or(0, |d| d.digits().len())
        }),
        ("cmp with self", |_, d, _, _| usize::from(d.cmp(&d.clone()).is_eq())),
    ]
}

fn main() {
    let inputs: Vec<(String, Decimal, Vec<u8>, Vec<u8>)> = DIGIT_COUNTS
        .iter()
        .map(|&n| {
            let text = literal(n);
            let decimal: Decimal = text.parse().unwrap();
            let key = decimal.encode_comparable();
            let wire = decimal.encode_big_decimal().unwrap();
            (text, decimal, key, wire)
        })
        .collect();

    println!();
    println!("vardecimal allocations (calls / bytes) by digit count");
    println!();
    print!("{:<22}", "operation");
    for n in DIGIT_COUNTS {
        print!(" {:>16}", format!("{n} digits"));
    }
    println!();

    for (name, op) in operations() {
        print!("{name:<22}");
        for (text, decimal, key, wire) in &inputs {
            let (calls, bytes) = tally(|| op(text, decimal, key, wire));
            print!(" {:>16}", format!("{calls} / {bytes}"));
        }
        println!();
    }

    let doubles = [
        ("from_f64 0.1", 0.1),
        ("from_f64 f64::MAX", f64::MAX),
        ("from_f64 denorm_min", f64::from_bits(1)),
    ];
    println!();
    for (name, value) in doubles {
        let (calls, bytes) = tally(|| Decimal::from_f64(value).map_or(0, |d| d.digits().len()));
        println!("{name:<22} {:>16}", format!("{calls} / {bytes}"));
    }
    println!();
}
