extern crate clap;
extern crate element;
extern crate env_logger;
#[macro_use]
extern crate generallist;
#[macro_use]
extern crate log;

use std::process;

use clap::{App, Arg};

use element::{Capabilities, Element, ErrorKind, RuntimeError};
use generallist::{Container, GeneralList, InsertContainer};

const SCENARIOS: &[&str] = &["construct", "list", "cast", "compare", "all"];

/// A type that can be neither printed nor compared
#[derive(Clone, Default)]
struct X;

impl X {
    fn func(&self) -> &'static str {
        "hello X"
    }
}

impl Capabilities for X {}

/// A generic type with a payload, comparable when its payload is
#[derive(Clone, PartialEq)]
struct Y<T> {
    val: T,
}

impl<T> Y<T> {
    fn new(val: T) -> Y<T> {
        Y { val }
    }

    fn func(&self) -> &'static str {
        "hello Y"
    }
}

impl<T: Capabilities + PartialEq> Capabilities for Y<T> {
    fn equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        Ok(self == other)
    }
}

/// Describe a refused operation without aborting the scenario
fn outcome(result: Result<bool, RuntimeError>) -> String {
    match result {
        Ok(value) => format!("{}", value),
        Err(e) => match e.error_kind() {
            ErrorKind::TypeCompareError { .. } => format!("type-compare error ({})", e),
            ErrorKind::MissingCapability { .. } => format!("missing capability ({})", e),
            ErrorKind::AccessError => format!("access error ({})", e),
            _ => format!("error ({})", e),
        },
    }
}

fn construct() -> Result<(), RuntimeError> {
    let elements = vec![
        Element::new(1.2),
        Element::new(X),
        Element::new(String::from("abcdefg")),
        Element::new(Y::new(10)),
        Element::empty(),
    ];

    for element in elements.iter() {
        println!("{} holds {}", element.id(), element);
    }

    Ok(())
}

fn list() -> Result<(), RuntimeError> {
    let e1 = Element::new(X);
    let e2 = Element::new(String::from("abcdefg"));

    let list0 = list![1, e1.clone(), e2.clone(), "abc"];
    let mut list = list!["1236546", X, Y::new(10)];
    list.insert(0, Element::new(list0))?;

    println!("{}", list);

    let nested = list[0].cast_ref::<GeneralList>()?;
    println!("{} (length {})", nested, nested.length());

    println!("l[0] == 1: {}", outcome(nested[0].equal(&1)));
    println!("l[1] == e1: {}", outcome(nested[1].equal(&e1)));
    println!("l[2] == e2: {}", outcome(nested[2].equal(&e2)));
    println!(
        "l[3] == String: {}",
        outcome(nested[3].equal(&String::from("abc")))
    );

    let pair = Element::new(list![1, list![2]]);
    println!("{} < [1, [3]]: {}", pair, outcome(pair.less(&list![1, list![3]])));
    println!("l == [1, 2]: {}", outcome(list[0].equal(&list![1, 2])));

    Ok(())
}

fn cast() -> Result<(), RuntimeError> {
    let e = Element::new(1.2);
    let e1 = Element::new(Y::new(String::from("hello")));
    let e2 = Element::new(String::from("abcdefg"));
    let e3 = Element::new(10);

    let mut y = e1.cast::<Y<String>>()?;
    println!("{} says {}", e1.id(), y.func());
    y.val = String::from("world");

    println!(
        "{} {} {} {} / copy now holds {}",
        e.cast::<f64>()?,
        e1.cast_ref::<Y<String>>()?.val,
        e2.cast::<String>()?,
        e3.cast::<i32>()?,
        y.val
    );

    let e4 = Element::new(X);
    println!("{}", e4.cast_ref::<X>()?.func());

    if let Err(e) = e4.cast::<i32>() {
        println!("cast refused: {}", e);
    }

    Ok(())
}

fn compare() -> Result<(), RuntimeError> {
    let e = Element::new(1.2);
    let e3 = Element::new(10);
    let e4 = Element::new(10);
    let e5 = Element::new(1.5);

    println!("e < e3: {}", outcome(e.less(&e3)));
    println!("e5 < e4: {}", outcome(e5.less(&e4)));

    println!("e > e5: {}", e.greater(&e5)?);
    println!("e != e5: {}", e.not_equal(&e5)?);
    println!("e3 >= e4: {}", e3.greater_equal(&e4)?);
    println!("e3 != e4: {}", e3.not_equal(&e4)?);

    let x = Element::new(X::default());
    println!("x < x: {}", outcome(x.less(&x)));
    println!("empty == e3: {}", outcome(Element::empty().equal(&e3)));

    let v = Element::new(vec![1, 2, 3]);
    println!("{} < [1, 2, 4]: {}", v.id(), outcome(v.less(&vec![1, 2, 4])));

    Ok(())
}

fn run(scenario: &str) -> Result<(), RuntimeError> {
    debug!("running scenario {}", scenario);

    match scenario {
        "construct" => construct(),
        "list" => list(),
        "cast" => cast(),
        "compare" => compare(),
        _ => {
            construct()?;
            list()?;
            cast()?;
            compare()
        }
    }
}

fn main() {
    env_logger::Builder::from_default_env().init();

    // parse command line argument, an optional scenario name
    let matches = App::new("element-demo")
        .about("Exercise type-erased Elements and GeneralLists")
        .arg(
            Arg::with_name("scenario")
                .help("Which scenario to run")
                .possible_values(SCENARIOS)
                .default_value("all")
                .index(1),
        )
        .get_matches();

    let scenario = matches.value_of("scenario").unwrap_or("all");

    run(scenario).unwrap_or_else(|err| {
        eprintln!("Terminated: {}", err);
        process::exit(1);
    });
}
