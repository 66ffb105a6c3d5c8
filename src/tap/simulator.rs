//! Session simulator for tap pacing and invariant checking.
//! Run with: cargo test -p tap-energy simulate_ -- --nocapture
