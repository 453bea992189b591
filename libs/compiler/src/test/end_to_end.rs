use crate::compile;
use crate::{Compiler, CompilerConfig};
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn declaration_feeds_the_returned_sum() -> anyhow::Result<()> {
    // one slot, 3 stored into it, reloaded and added to 4: evaluates to 7
    let compiled = compile! {
        "
        var x = 3;
        return x + 4;
        "
    };

    assert_eq!(
        compiled,
        indoc! {
            "
              .intel_syntax noprefix

              .globl main
            main:
              push rbp
              mov rbp, rsp
              sub rsp, 4
              mov eax, 3
              mov DWORD PTR [rbp-4], eax
              mov eax, DWORD PTR [rbp-4]
              xchg eax, edx
              mov eax, 4
              xchg eax, edx
              add eax, edx
              leave
              ret
              leave
              ret
            "
        }
    );

    Ok(())
}

#[test]
fn zero_condition_runs_only_the_else_branch() -> anyhow::Result<()> {
    // both branches declare `x`, so there is one slot; the false path
    // stores 2 and the true path's store of 1 is jumped over
    let compiled = compile! {
        "
        if (0) var x = 1; else var x = 2;
        "
    };

    assert_eq!(
        compiled,
        indoc! {
            "
              .intel_syntax noprefix

              .globl main
            main:
              push rbp
              mov rbp, rsp
              sub rsp, 4
              mov eax, 0
              cmp eax, 0
              jz false0
              mov eax, 1
              mov DWORD PTR [rbp-4], eax
              jmp end1
            false0:
              mov eax, 2
              mov DWORD PTR [rbp-4], eax
            end1:
              leave
              ret
            "
        }
    );

    Ok(())
}

#[test]
fn lowering_is_idempotent() -> anyhow::Result<()> {
    let source = "var x = 3; if (x) x = x * 2; else x = x - 1; return x;";

    let tokenizer = tokenizer::Tokenizer::from(String::from(source));
    let mut parser = parser::Parser::new(tokenizer);
    let tree = parser
        .parse_all()?
        .expect("the parser always yields a root block");

    let first = Compiler::new(None).compile(&tree)?.to_string();
    let second = Compiler::new(None).compile(&tree)?.to_string();

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn entry_point_name_is_configurable() -> anyhow::Result<()> {
    let tokenizer = tokenizer::Tokenizer::from(String::from("return 0;"));
    let mut parser = parser::Parser::new(tokenizer);
    let tree = parser
        .parse_all()?
        .expect("the parser always yields a root block");

    let config = CompilerConfig {
        entry_point: String::from("do_thing"),
    };
    let compiled = Compiler::new(Some(config)).compile(&tree)?.to_string();

    assert_eq!(
        compiled,
        indoc! {
            "
              .intel_syntax noprefix

              .globl do_thing
            do_thing:
              push rbp
              mov rbp, rsp
              mov eax, 0
              leave
              ret
              leave
              ret
            "
        }
    );

    Ok(())
}
