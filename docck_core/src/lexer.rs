use logos::Logos;

/// Raw tokens for shell-style splitting of directive arguments.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[regex(r"[ \t\r\n]+")]
	Whitespace,
	#[regex(r#"[^ \t\r\n'"\\]+"#)]
	Bare,
	#[regex(r"'[^']*'")]
	SingleQuotedString,
	#[regex(r#""([^"\\]|\\.)*""#)]
	DoubleQuotedString,
	#[regex(r"\\.")]
	Escaped,
}

/// Split `input` into words the way a POSIX shell would, without any
/// expansion.
///
/// - Single quotes keep everything literally.
/// - Double quotes only treat `\"` and `\\` as escapes.
/// - Outside quotes a backslash escapes the next character.
/// - Adjacent pieces join into one word, so `a"b c"` is `ab c` and `""` is
///   an empty word.
pub(crate) fn split_arguments(input: &str) -> Result<Vec<String>, String> {
	let mut words = Vec::new();
	let mut word: Option<String> = None;

	for (result, span) in RawToken::lexer(input).spanned() {
		let slice = &input[span];

		// Logical lines never end in a lone `\`, so only an open quote can
		// fail to lex.
		let Ok(token) = result else {
			return Err("no closing quotation".to_string());
		};

		let piece = match token {
			RawToken::Whitespace => {
				words.extend(word.take());
				continue;
			}
			RawToken::Bare => slice.to_string(),
			RawToken::SingleQuotedString => slice[1..slice.len() - 1].to_string(),
			RawToken::DoubleQuotedString => unescape_double_quoted(&slice[1..slice.len() - 1]),
			RawToken::Escaped => slice[1..].to_string(),
		};

		word.get_or_insert_with(String::new).push_str(&piece);
	}

	words.extend(word);
	Ok(words)
}

fn unescape_double_quoted(inner: &str) -> String {
	let mut unescaped = String::with_capacity(inner.len());
	let mut chars = inner.chars();

	while let Some(ch) = chars.next() {
		if ch != '\\' {
			unescaped.push(ch);
			continue;
		}

		match chars.next() {
			Some(escaped @ ('"' | '\\')) => unescaped.push(escaped),
			Some(other) => {
				unescaped.push('\\');
				unescaped.push(other);
			}
			None => unescaped.push('\\'),
		}
	}

	unescaped
}
