// Scanned by the tests as source text and compiled into them as a module.
#![allow(dead_code)]

use rpcbridge::Value;

pub fn add(a: i64, b: i64) -> i64 {
    a + b
}

pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator
}

pub fn is_even(n: i64) -> bool {
    n % 2 == 0
}

pub fn shout(text: String) -> String {
    text.to_uppercase()
}

pub fn ping() -> String {
    "pong".to_owned()
}

pub fn log_line(line: String) {
    let _ = line;
}

pub fn echo(value: Value) -> Value {
    value
}

pub fn first(value: i64, _: i64) -> i64 {
    value
}

pub fn initial(c: char) -> String {
    c.to_string()
}

pub fn total(values: Vec<i64>) -> i64 {
    values.iter().sum()
}

pub fn last_char(text: String) -> char {
    text.chars().last().unwrap_or(' ')
}

pub fn greet(name: String) -> String {
    format!("Hello, {name}!")
}

mod nested {
    pub fn hidden(x: i64) -> i64 {
        x
    }
}

fn main() {}
