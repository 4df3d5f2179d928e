use regex_facade::{Regex, Replacement};

fn main() -> regex_facade::Result<()> {
    let re = Regex::new("/here(goes)the[regex]/i");
    println!("{re} exec    -> {:?}", re.exec("heregoesthexeger")?);
    println!("{re} replace -> {}", re.replace("heregoestheregex", "thatworks$1")?);
    println!("{re} filter  -> {:?}", re.filter("someotherthing", "thatworks$1")?);

    let global = Regex::new("/test(some)string/ig");
    let subject = "testsomestringsomethingelsetestsomestring";
    println!("{global} exec    -> {:?}", global.exec(subject)?);
    println!("{global} replace -> {}", global.replace(subject, "yes$1true")?);

    let words = Regex::new(r"/[\s,]+/");
    println!("{words} split   -> {:?}", words.split("hypertext language, programming")?);

    let digits = Regex::new(r"/(\d+)/");
    let doubled = digits.replace(
        "3 apples and 12 pears",
        Replacement::callback(|m: &[String]| {
            m[1].parse::<u64>().map_or_else(|_| m[1].clone(), |n| (n * 2).to_string())
        }),
    )?;
    println!("{digits} callback -> {doubled}");

    println!("quote -> {}", Regex::quote("some[text]", Some('/')));
    println!("last error -> {:?}", Regex::last_error());
    Ok(())
}
