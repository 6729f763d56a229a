use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::{line_ending, not_line_ending, space0},
    Finish, IResult,
};

use crate::Result;

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

fn parse_field_name(input: &str) -> IResult<&str, &str> {
    take_while1(is_token_char)(input)
}

fn parse_line_end(input: &str) -> IResult<&str, ()> {
    if input.is_empty() {
        return Ok((input, ()));
    }
    let (input, _) = line_ending(input)?;
    Ok((input, ()))
}

fn parse_field_value(input: &str) -> IResult<&str, &str> {
    let (input, value) = not_line_ending(input)?;
    let (input, _) = parse_line_end(input)?;
    Ok((input, value.trim()))
}

fn parse_field(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = space0(input)?;
    let (input, name) = parse_field_name(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, _) = space0(input)?;
    let (input, value) = parse_field_value(input)?;
    Ok((input, (name, value)))
}

fn parse_blank_line(input: &str) -> IResult<&str, ()> {
    let (input, _) = space0(input)?;
    let (input, _) = line_ending(input)?;
    Ok((input, ()))
}

fn parse_line(input: &str) -> IResult<&str, Line<'_>> {
    if let Ok((input, _)) = parse_blank_line(input) {
        return Ok((input, Line::Blank));
    }
    let (input, (name, value)) = parse_field(input)?;
    Ok((input, Line::Field(Field { name, value })))
}

#[derive(Debug, PartialEq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Field(Field<'a>),
    Blank,
}

pub struct FieldIter<'a> {
    input: &'a str,
}

impl<'a> Iterator for FieldIter<'a> {
    type Item = Result<Field<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.input.trim().is_empty() {
                return None;
            }
            let (new_input, line) = match parse_line(self.input)
                .finish()
                .map_err(|e| crate::Error::ConfigError(format!("invalid header line: {}", e)))
            {
                Ok(result) => result,
                Err(e) => {
                    self.input = "";
                    return Some(Err(e));
                }
            };
            self.input = new_input;
            if let Line::Field(field) = line {
                return Some(Ok(field));
            }
        }
    }
}

pub fn parse_block(input: &'_ str) -> FieldIter<'_> {
    FieldIter { input }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_name() {
        let (input, output) = parse_field_name("Content-Type: text/plain").unwrap();
        assert_eq!(input, ": text/plain");
        assert_eq!(output, "Content-Type");

        let (_, output) = parse_field_name("X_Custom.1: value").unwrap();
        assert_eq!(output, "X_Custom.1");

        assert!(parse_field_name(": value").is_err());
    }

    #[test]
    fn test_parse_field() {
        let (input, output) = parse_field("Authorization:  Bearer token  \n").unwrap();
        assert_eq!(input, "");
        assert_eq!(output, ("Authorization", "Bearer token"));

        let (input, output) = parse_field("X-Custom : value\r\nAccept: */*").unwrap();
        assert_eq!(input, "Accept: */*");
        assert_eq!(output, ("X-Custom", "value"));

        let (input, output) = parse_field("Accept: */*").unwrap();
        assert_eq!(input, "");
        assert_eq!(output, ("Accept", "*/*"));

        assert!(parse_field("Bad Name: value\n").is_err());
        assert!(parse_field("no colon here\n").is_err());
    }

    #[test]
    fn test_parse_line() {
        let (_, output) = parse_line("  \r\n").unwrap();
        assert_eq!(output, Line::Blank);

        let (_, output) = parse_line("X-Empty:\n").unwrap();
        assert_eq!(
            output,
            Line::Field(Field {
                name: "X-Empty",
                value: ""
            })
        );
    }

    #[test]
    fn test_parse_block() {
        let input = "Authorization: Bearer token\n\nAccept: text/html\r\nAccept: */*";
        let output: Vec<Field> = parse_block(input).collect::<Result<_>>().unwrap();
        assert_eq!(
            output,
            vec![
                Field {
                    name: "Authorization",
                    value: "Bearer token"
                },
                Field {
                    name: "Accept",
                    value: "text/html"
                },
                Field {
                    name: "Accept",
                    value: "*/*"
                },
            ]
        );

        let mut fields = parse_block("X-Ok: 1\n???\nX-Never: 2\n");
        assert!(fields.next().unwrap().is_ok());
        assert!(matches!(
            fields.next(),
            Some(Err(crate::Error::ConfigError(_)))
        ));
        assert!(fields.next().is_none());
    }
}
