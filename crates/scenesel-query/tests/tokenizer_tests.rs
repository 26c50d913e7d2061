//! Integration tests for the selector tokenizer.

use scenesel_query::tokenizer::{SelectorTokenizer, Token, tokenize};

#[test]
fn test_empty_input_is_just_eof() {
    assert_eq!(tokenize(""), vec![Token::EOF]);
}

#[test]
fn test_whitespace_run_collapses() {
    let tokens = tokenize("   \t\n  ");
    assert_eq!(tokens, vec![Token::Whitespace, Token::EOF]);
}

#[test]
fn test_ident_with_hyphen() {
    let tokens = tokenize("data-role");
    assert_eq!(tokens, vec![Token::ident("data-role"), Token::EOF]);
}

#[test]
fn test_ident_starting_with_hyphen() {
    let tokens = tokenize("-custom");
    assert_eq!(tokens, vec![Token::ident("-custom"), Token::EOF]);
}

#[test]
fn test_hash() {
    let tokens = tokenize("#header");
    assert_eq!(tokens, vec![Token::hash("header"), Token::EOF]);
}

#[test]
fn test_lone_hash_is_delim() {
    let tokens = tokenize("# ");
    assert_eq!(tokens, vec![Token::Delim('#'), Token::Whitespace, Token::EOF]);
}

#[test]
fn test_child_combinator_with_spaces() {
    let tokens = tokenize("#a > rect");
    assert_eq!(
        tokens,
        vec![
            Token::hash("a"),
            Token::Whitespace,
            Token::Delim('>'),
            Token::Whitespace,
            Token::ident("rect"),
            Token::EOF,
        ]
    );
}

#[test]
fn test_attribute_selector_tokens() {
    let tokens = tokenize(r#"rect[fill~="red"]"#);
    assert_eq!(
        tokens,
        vec![
            Token::ident("rect"),
            Token::Delim('['),
            Token::ident("fill"),
            Token::Delim('~'),
            Token::Delim('='),
            Token::string("red"),
            Token::Delim(']'),
            Token::EOF,
        ]
    );
}

#[test]
fn test_every_operator_character_is_a_delim() {
    let tokens = tokenize("|^$*=~");
    let delims: Vec<char> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Delim(c) => Some(*c),
            _ => None,
        })
        .collect();
    assert_eq!(delims, vec!['|', '^', '$', '*', '=', '~']);
}

#[test]
fn test_string_payload_excludes_both_quotes() {
    assert_eq!(tokenize(r#""red""#)[0], Token::string("red"));
    assert_eq!(tokenize("'red'")[0], Token::string("red"));
}

#[test]
fn test_string_with_other_quote_inside() {
    assert_eq!(tokenize(r#""it's""#)[0], Token::string("it's"));
}

#[test]
fn test_string_escape() {
    assert_eq!(tokenize(r#""a\"b""#)[0], Token::string("a\"b"));
    assert_eq!(tokenize(r#""\41 B""#)[0], Token::string("AB"));
}

#[test]
fn test_unterminated_string_keeps_content() {
    assert_eq!(tokenize(r#""open"#), vec![Token::string("open"), Token::EOF]);
}

#[test]
fn test_newline_in_string_is_bad_string() {
    let tokens = tokenize("\"bad\nrest");
    assert_eq!(tokens[0], Token::BadString);
    assert_eq!(tokens[1], Token::Whitespace);
    assert_eq!(tokens[2], Token::ident("rest"));
}

#[test]
fn test_numbers_keep_source_text() {
    assert_eq!(tokenize("12")[0], Token::Number("12".to_string()));
    assert_eq!(tokenize("-0.5")[0], Token::Number("-0.5".to_string()));
    assert_eq!(tokenize("10px")[0], Token::Number("10px".to_string()));
    assert_eq!(tokenize("50%")[0], Token::Number("50%".to_string()));
    assert_eq!(tokenize("1e3")[0], Token::Number("1e3".to_string()));
}

#[test]
fn test_function_token() {
    let tokens = tokenize("nth-child(2)");
    assert_eq!(tokens[0], Token::Function("nth-child".to_string()));
    assert_eq!(tokens[1], Token::Number("2".to_string()));
    assert_eq!(tokens[2], Token::Delim(')'));
}

#[test]
fn test_comments_are_skipped() {
    let tokens = tokenize("rect/* note */frame");
    assert_eq!(
        tokens,
        vec![Token::ident("rect"), Token::ident("frame"), Token::EOF]
    );
}

#[test]
fn test_escaped_ident() {
    let tokens = tokenize(r"a\:b");
    assert_eq!(tokens[0], Token::ident("a:b"));
}

#[test]
fn test_tokenizer_struct_api() {
    let mut tokenizer = SelectorTokenizer::new("*");
    tokenizer.run();
    assert_eq!(tokenizer.tokens(), &[Token::Delim('*'), Token::EOF]);
    assert_eq!(tokenizer.into_tokens().len(), 2);
}

#[test]
fn test_tokens_render_as_source_text() {
    let text: String = tokenize(r#"#a >  rect[fill~='red']"#)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(text, r#"#a > rect[fill~="red"]"#);
    assert_eq!(Token::Function("not".to_string()).to_string(), "not(");
    assert_eq!(Token::EOF.to_string(), "");
}
