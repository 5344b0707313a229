use crate::analysis::stopword::StopWordSet;
use crate::analysis::tokenizer::{split_words, validate_word};
use crate::core::error::{Error, ErrorKind, Result};

/// Parsed query: required and forbidden terms, each sorted and
/// deduplicated. Order within a list carries no ranking meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: Vec<String>,
    pub minus_words: Vec<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(stop_words: &StopWordSet, text: &'a str) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };

    validate_word(data)?;

    if is_minus && (data.is_empty() || data.starts_with('-')) {
        return Err(Error::new(
            ErrorKind::MalformedMinus,
            format!("query word \"{}\" has an empty or doubled minus", text),
        ));
    }

    Ok(QueryWord {
        data,
        is_minus,
        is_stop: stop_words.contains(data),
    })
}

/// Classifies each raw token as plus, minus, or stop. Stop words are
/// dropped silently once validation has passed.
pub fn parse_query(stop_words: &StopWordSet, text: &str) -> Result<Query> {
    let mut query = Query::default();

    for word in split_words(text) {
        let query_word = parse_query_word(stop_words, word)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.push(query_word.data.to_string());
        } else {
            query.plus_words.push(query_word.data.to_string());
        }
    }

    query.plus_words.sort_unstable();
    query.plus_words.dedup();
    query.minus_words.sort_unstable();
    query.minus_words.dedup();

    Ok(query)
}
