use crate::compile;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn declaration_stores_literal() -> anyhow::Result<()> {
    let compiled = compile! {
        "
        var i = 20;
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
              mov eax, 20
              mov DWORD PTR [rbp-4], eax
              leave
              ret
            "
        }
    );

    Ok(())
}

#[test]
fn slots_are_assigned_lexicographically() -> anyhow::Result<()> {
    // `a` gets slot 1 and `b` slot 2 regardless of declaration order
    let compiled = compile! {
        "
        var b = 1;
        var a = 2;
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
              sub rsp, 8
              mov eax, 1
              mov DWORD PTR [rbp-8], eax
              mov eax, 2
              mov DWORD PTR [rbp-4], eax
              leave
              ret
            "
        }
    );

    Ok(())
}

#[test]
fn duplicate_declarations_share_one_slot() -> anyhow::Result<()> {
    let compiled = compile! {
        "
        var x = 1;
        var x = 2;
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
              mov eax, 1
              mov DWORD PTR [rbp-4], eax
              mov eax, 2
              mov DWORD PTR [rbp-4], eax
              leave
              ret
            "
        }
    );

    Ok(())
}

#[test]
fn missing_initializer_stores_the_working_register() -> anyhow::Result<()> {
    // `var x;` has no value to evaluate; the slot receives whatever
    // register A happens to hold
    let compiled = compile! {
        "
        var x;
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
              mov DWORD PTR [rbp-4], eax
              leave
              ret
            "
        }
    );

    Ok(())
}
