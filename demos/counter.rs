use lull::generator;
use lull::producer::Step;

fn main() {
    let mut count = 0u64;
    let mut counter = generator::lazy(move || -> Step<u64, &'static str> {
        count += 1;
        Step::Yield(count - 1)
    });
    for _ in 0..20 {
        println!("Counter: {}", counter.next().unwrap());
    }
}
