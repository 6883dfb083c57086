#![allow(missing_docs)]

#[macro_use]
extern crate criterion;


criterion_group!(benches, crate::skiplist::benchmark);
criterion_main!(benches);
