use crate::profile::Profiler;
use nom::{
    error::{ErrorKind, ParseError},
    Compare, CompareResult, Err, InputIter, InputLength, InputTake, InputTakeAtPosition,
    Needed, Offset, Slice,
};
use std::{
    ops::{RangeFrom, RangeTo},
    str::{CharIndices, Chars},
};

/// Parser position: the unread rest of the source plus the current line.
///
/// Slicing never recounts lines. The line only moves forward through
/// [`Cursor::newlines`], which the whitespace rule calls for every newline it
/// skips, so newlines inside string literals are not counted.
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a str,
    line: usize,
    profiler: Option<&'a Profiler>,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            data,
            line: 1,
            profiler: None,
        }
    }

    pub fn with_profiler(data: &'a str, profiler: &'a Profiler) -> Self {
        Self {
            profiler: Some(profiler),
            ..Self::new(data)
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn fragment(&self) -> &'a str {
        self.data
    }

    pub fn profiler(&self) -> Option<&'a Profiler> {
        self.profiler
    }

    pub fn peek(&self) -> Option<char> {
        self.data.chars().next()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Skips `count` bytes. `count` must fall on a char boundary.
    pub fn advance(&self, count: usize) -> Self {
        self.slice(count..)
    }

    pub fn newlines(self, count: usize) -> Self {
        Self {
            line: self.line + count,
            ..self
        }
    }

    fn with_data(&self, data: &'a str) -> Self {
        Self { data, ..*self }
    }
}

impl<'a> std::fmt::Debug for Cursor<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("data", &self.data)
            .field("line", &self.line)
            .finish()
    }
}

impl<'a, 'b> Compare<&'b str> for Cursor<'a> {
    fn compare(&self, t: &'b str) -> CompareResult {
        self.data.compare(t)
    }

    fn compare_no_case(&self, t: &'b str) -> CompareResult {
        self.data.compare_no_case(t)
    }
}

impl<'a> InputIter for Cursor<'a> {
    type Item = char;

    type Iter = CharIndices<'a>;

    type IterElem = Chars<'a>;

    fn iter_indices(&self) -> Self::Iter {
        self.data.char_indices()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.data.chars()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        self.data.position(predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, Needed> {
        self.data.slice_index(count)
    }
}

impl<'a> InputLength for Cursor<'a> {
    fn input_len(&self) -> usize {
        self.data.len()
    }
}

impl<'a> InputTake for Cursor<'a> {
    fn take(&self, count: usize) -> Self {
        self.slice(..count)
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        (self.slice(count..), self.slice(..count))
    }
}

impl<'a> InputTakeAtPosition for Cursor<'a> {
    type Item = char;

    fn split_at_position<P, E: ParseError<Self>>(&self, predicate: P) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.find(|c: char| predicate(c)) {
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(Needed::new(1))),
        }
    }

    fn split_at_position1<P, E: ParseError<Self>>(
        &self,
        predicate: P,
        e: ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.find(|c: char| predicate(c)) {
            Some(0) => Err(Err::Error(E::from_error_kind(*self, e))),
            Some(n) => Ok(self.take_split(n)),
            None => Err(Err::Incomplete(Needed::new(1))),
        }
    }

    fn split_at_position_complete<P, E: ParseError<Self>>(
        &self,
        predicate: P,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        let n = self.data.find(|c: char| predicate(c)).unwrap_or(self.data.len());

        Ok(self.take_split(n))
    }

    fn split_at_position1_complete<P, E: ParseError<Self>>(
        &self,
        predicate: P,
        e: ErrorKind,
    ) -> nom::IResult<Self, Self, E>
    where
        P: Fn(Self::Item) -> bool,
    {
        match self.data.find(|c: char| predicate(c)).unwrap_or(self.data.len()) {
            0 => Err(Err::Error(E::from_error_kind(*self, e))),
            n => Ok(self.take_split(n)),
        }
    }
}

impl<'a> Offset for Cursor<'a> {
    fn offset(&self, second: &Self) -> usize {
        self.data.offset(second.data)
    }
}

impl<'a> Slice<RangeTo<usize>> for Cursor<'a> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        self.with_data(self.data.slice(range))
    }
}

impl<'a> Slice<RangeFrom<usize>> for Cursor<'a> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        self.with_data(self.data.slice(range))
    }
}
