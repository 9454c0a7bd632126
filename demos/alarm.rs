use std::time::Duration;

use lull::time::Alarm;

fn main() {
    let mut alarm = Alarm::after(Duration::from_millis(200));
    let mut polls = 0u64;
    while !alarm.lapsed() {
        polls += 1;
    }
    println!("lapsed after {} polls", polls);
}
