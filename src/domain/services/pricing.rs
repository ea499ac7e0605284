use chrono::NaiveDate;

pub fn nights(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn total_price(nightly_price: f64, start: NaiveDate, end: NaiveDate) -> f64 {
    nightly_price * nights(start, end) as f64
}
