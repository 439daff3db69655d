//! Integration tests for end-to-end scanning.
//!
//! These tests drive the public library API over realistic programs and run
//! the `cminus-lex` binary the way a user would.

use std::{
    fs,
    io::{BufReader, Write},
    path::PathBuf,
    process::{Command, Stdio},
};

use cminus_lexer::{
    lexer::{
        lexer::{tokenize, Scanner},
        tokens::TokenKind,
    },
    report::report::{diagnostics, write_token_table},
};
use pretty_assertions::assert_eq;

const PROGRAM: &str = "/* compute the sum of an array */
int sum(int a[], int n)
{
  int i; int s;
  i = 0; s = 0;
  while (i < n) {
    s = s + a[i];
    i++;
  }
  return s;
}

void main(void)
{
  int x[10];
  if (sum(x, 10) != 0) return; else x[0] = 1;
}
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cminus_lexer_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_scan_whole_program() {
    let tokens = tokenize(PROGRAM);

    assert_eq!(tokens.iter().filter(|t| t.is_error()).count(), 0);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFile));

    let reserved: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind.is_reserved())
        .map(|t| t.lexeme.as_str())
        .collect();
    assert_eq!(
        reserved,
        vec![
            "int", "int", "int", "int", "int", "while", "return", "void", "void", "int", "if",
            "return", "else"
        ]
    );

    let sum = &tokens[1];
    assert_eq!(sum.kind, TokenKind::Id);
    assert_eq!((sum.line, sum.column), (2, 5));

    let neq = tokens.iter().find(|t| t.kind == TokenKind::Neq).unwrap();
    assert_eq!((neq.line, neq.column), (16, 18));
}

#[test]
fn test_scan_from_buffered_file() {
    let dir = scratch_dir("buffered");
    let path = dir.join("program.cm");
    fs::write(&path, PROGRAM).unwrap();

    let file = fs::File::open(&path).unwrap();
    let from_file: Vec<_> = Scanner::new(BufReader::new(file)).collect();

    assert_eq!(from_file, tokenize(PROGRAM));
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_errors_do_not_stop_scanning() {
    let source = "int x;\nx = 3 # 4;\ny = !x;\n";
    let tokens = tokenize(source);
    let errors = diagnostics(&tokens);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(), "unrecognised character: \"#\" at 2:7");
    assert_eq!(errors[1].to_string(), "unrecognised character: \"!\" at 3:5");
    assert_eq!(tokens[tokens.len() - 2].kind, TokenKind::Semi);
}

#[test]
fn test_token_table_for_program() {
    let mut scanner = Scanner::new("void f(void) { return; }".as_bytes());
    let mut out = Vec::new();
    let summary = write_token_table(&mut scanner, &mut out).unwrap();
    let table = String::from_utf8(out).unwrap();

    assert_eq!(summary.tokens, 9);
    assert!(summary.is_clean());
    assert_eq!(table.lines().count(), 2 + 9 + 1);
    assert!(table.contains("ID                  \"f\"                 \"f\"\n"));
    assert!(table.contains("RETURN              \"return\"            \n"));
}

#[test]
fn test_binary_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cminus-lex"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .env_remove("RUST_LOG")
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"int x;\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        concat!(
            "TOKEN               LEXEME              VALUE               \n",
            "=====               ======              =====               \n",
            "INT                 \"int\"               \n",
            "ID                  \"x\"                 \"x\"\n",
            "SEMI                \";\"                 \n",
            "END_OF_FILE         \"\" \n",
        )
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn test_binary_writes_output_file_and_reports_errors() {
    let dir = scratch_dir("binary");
    let input = dir.join("bad.cm");
    let table = dir.join("tokens.txt");
    fs::write(&input, "int @;\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cminus-lex"))
        .arg(&input)
        .arg("-o")
        .arg(&table)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    let written = fs::read_to_string(&table).unwrap();
    assert!(written.contains("ERROR               \"@\"                 Line: 1; Column: 5\n"));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: UnrecognisedCharacter (Unrecognised character `@`)"));
    assert!(stderr.contains(":1:5"));

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_binary_missing_input() {
    let dir = scratch_dir("missing");

    let output = Command::new(env!("CARGO_BIN_EXE_cminus-lex"))
        .arg(dir.join("nope.cm"))
        .arg("-o")
        .arg(dir.join("out.txt"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().contains("Error: OpenFile"));

    fs::remove_dir_all(dir).unwrap();
}
