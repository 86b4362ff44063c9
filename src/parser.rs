use crate::error::{Container, Kind, ParseError};
use crate::input::Cursor;
use crate::profile::Profiler;
use crate::value::Value;
use memchr::memchr;
use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1},
    combinator::{map, opt, recognize, value},
    sequence::tuple,
    Err, IResult,
};
use std::{collections::HashMap, fs::File, io::Read, path::Path};
use tracing::debug;

pub type Span<'a> = Cursor<'a>;

pub type Result<'a, R> = IResult<Span<'a>, R, ParseError>;
pub type ParseResult = std::result::Result<Value, ParseError>;

fn failure<R>(i: Span, kind: Kind) -> Result<R> {
    Err(Err::Failure(ParseError::new(kind, i.line())))
}

fn is_sp(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

fn sp(i: Span) -> Result<()> {
    let (i, skipped) = take_while(is_sp)(i)?;

    Ok((i.newlines(bytecount::count(skipped.fragment().as_bytes(), b'\n')), ()))
}

fn token<'a>(c: char) -> impl FnMut(Span<'a>) -> Result<'a, char> {
    char(c)
}

fn keyword<'a>(word: &'static str) -> impl FnMut(Span<'a>) -> Result<'a, Span<'a>> {
    move |i: Span<'a>| {
        tag(word)(i).or_else(|_: Err<ParseError>| failure(i, Kind::InvalidLiteral(word)))
    }
}

fn string(i: Span) -> Result<String> {
    let (i, _) = token('"')(i)?;

    match memchr(b'"', i.fragment().as_bytes()) {
        Some(end) => {
            let content = i.fragment()[..end].to_owned();

            Ok((i.advance(end + 1), content))
        }
        None => failure(i, Kind::MissingQuote),
    }
}

fn integer(i: Span) -> Result<()> {
    if i.peek() == Some('0') {
        let i = i.advance(1);

        if i.peek().is_some_and(|c| c.is_ascii_digit()) {
            return failure(i, Kind::LeadingZero);
        }

        return Ok((i, ()));
    }

    map(digit1, |_| ())(i).or_else(|_: Err<ParseError>| {
        let found = i.peek().map(String::from).unwrap_or_default();

        failure(i, Kind::InvalidNumber(found))
    })
}

fn fraction(i: Span) -> Result<()> {
    let (i, _) = token('.')(i)?;

    match digit1::<_, ParseError>(i) {
        Ok((i, _)) => Ok((i, ())),
        Err(_) => failure(i, Kind::MissingFraction),
    }
}

fn number(i: Span) -> Result<f64> {
    let (rest, text) = recognize(tuple((opt(token('-')), integer, opt(fraction))))(i)?;

    // Out of range text parses to infinity, which has no JSON spelling
    match text.fragment().parse::<f64>() {
        Ok(num) if num.is_finite() => Ok((rest, num)),
        _ => failure(i, Kind::InvalidNumber(text.fragment().to_owned())),
    }
}

fn array(i: Span) -> Result<Vec<Value>> {
    let (i, _) = token('[')(i)?;
    let (mut i, _) = sp(i)?;

    let mut values = Vec::new();

    if let Ok((i, _)) = token(']')(i) {
        return Ok((i, values));
    }

    loop {
        let (rest, value) = json_value(i)?;
        values.push(value);

        let (rest, _) = sp(rest)?;

        if let Ok((rest, _)) = token(']')(rest) {
            return Ok((rest, values));
        }

        let (rest, _) = token(',')(rest)
            .or_else(|_| failure(rest, Kind::MissingComma(Container::Array)))?;

        i = rest;
    }
}

fn key_value(i: Span) -> Result<(String, Value)> {
    let (i, _) = sp(i)?;

    match i.peek() {
        Some('"') => (),
        Some(_) => return failure(i, Kind::InvalidKey),
        None => return failure(i, Kind::UnexpectedEnd),
    }

    let (i, key) = string(i)?;
    let (i, _) = sp(i)?;
    let (i, _) = token(':')(i).or_else(|_| failure(i, Kind::MissingColon))?;
    let (i, value) = json_value(i)?;

    Ok((i, (key, value)))
}

fn hash(i: Span) -> Result<HashMap<String, Value>> {
    let (i, _) = token('{')(i)?;
    let (mut i, _) = sp(i)?;

    let mut entries = HashMap::new();

    if let Ok((i, _)) = token('}')(i) {
        return Ok((i, entries));
    }

    loop {
        let (rest, (key, value)) = key_value(i)?;
        // Last write wins on duplicate keys
        entries.insert(key, value);

        let (rest, _) = sp(rest)?;

        if let Ok((rest, _)) = token('}')(rest) {
            return Ok((rest, entries));
        }

        let (rest, _) = token(',')(rest)
            .or_else(|_| failure(rest, Kind::MissingComma(Container::Object)))?;

        i = rest;
    }
}

fn json_value(i: Span) -> Result<Value> {
    let _block = i.profiler().map(|profiler| profiler.block("parse_value"));

    let (i, _) = sp(i)?;

    let Some(first_char) = i.peek() else {
        return failure(i, Kind::UnexpectedEnd);
    };

    match first_char {
        'n' => value(Value::Null, keyword("null"))(i),
        't' => value(Value::Boolean(true), keyword("true"))(i),
        'f' => value(Value::Boolean(false), keyword("false"))(i),
        '"' => map(string, Value::String)(i),
        '[' => map(array, Value::Array)(i),
        '{' => map(hash, Value::Object)(i),
        '-' | '0'..='9' => map(number, Value::Number)(i),
        c => failure(i, Kind::UnexpectedChar(c)),
    }
}

fn root(i: Span) -> Result<Value> {
    let (i, _) = sp(i)?;

    if i.is_empty() {
        return failure(i, Kind::EmptyInput);
    }

    let (i, value) = json_value(i)?;
    let (i, _) = sp(i)?;

    if !i.is_empty() {
        return failure(i, Kind::CharsAfterRoot);
    }

    Ok((i, value))
}

fn unwrap_nom_error<T>(value: Result<T>) -> std::result::Result<T, ParseError> {
    match value {
        Ok((_, v)) => Ok(v),
        Err(Err::Error(e)) | Err(Err::Failure(e)) => Err(e),
        // Only complete combinators are used
        Err(Err::Incomplete(_)) => Err(ParseError::new(Kind::UnexpectedEnd, 0)),
    }
}

fn run(span: Span) -> ParseResult {
    debug!(bytes = span.fragment().len(), "parsing document");

    let result = unwrap_nom_error(root(span));

    match &result {
        Ok(value) => debug!(root = %value.kind(), "parsed document"),
        Err(e) => debug!(line = e.line, error = %e.kind, "failed to parse document"),
    }

    result
}

/// Parses a whole document. Fails on the first grammar violation.
pub fn parse(s: &str) -> ParseResult {
    run(Span::new(s))
}

/// Same as [`parse`], recording a `"parse"` region for the whole call and a
/// `"parse_value"` region for every value into `profiler`.
pub fn parse_profiled(s: &str, profiler: &Profiler) -> ParseResult {
    let _block = profiler.bandwidth("parse", s.len() as u64);

    run(Span::with_profiler(s, profiler))
}

fn read_file(path: &Path, profiler: Option<&Profiler>) -> std::result::Result<String, ParseError> {
    let mut file = File::open(path).map_err(|_| {
        ParseError::new(
            Kind::Io(format!("Unable to open file at '{}'.", path.display())),
            0,
        )
    })?;

    let block = profiler.map(|profiler| profiler.block("read file"));

    let mut json = String::new();
    file.read_to_string(&mut json).map_err(|e| {
        ParseError::new(
            Kind::Io(format!("Unable to read file at '{}': {}", path.display(), e)),
            0,
        )
    })?;

    if let Some(block) = &block {
        block.add_bytes(json.len() as u64);
    }

    Ok(json)
}

/// Reads `path` fully into memory and parses it.
pub fn parse_file(path: impl AsRef<Path>) -> ParseResult {
    let json = read_file(path.as_ref(), None)?;

    parse(&json)
}

pub fn parse_file_profiled(path: impl AsRef<Path>, profiler: &Profiler) -> ParseResult {
    let json = read_file(path.as_ref(), Some(profiler))?;

    parse_profiled(&json, profiler)
}
