use crate::compile;
use indoc::indoc;
use pretty_assertions::assert_eq;

#[test]
fn children_lower_in_list_order() -> anyhow::Result<()> {
    let compiled = compile! {
        "
        var first = 1;
        var second = 2;
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
              mov DWORD PTR [rbp-4], eax
              mov eax, 2
              mov DWORD PTR [rbp-8], eax
              leave
              ret
            "
        }
    );

    Ok(())
}

#[test]
fn nested_block_shares_the_frame() -> anyhow::Result<()> {
    let compiled = compile! {
        "
        var x;
        { x = 1; }
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
              mov eax, 1
              mov DWORD PTR [rbp-4], eax
              leave
              ret
            "
        }
    );

    Ok(())
}

#[test]
fn empty_block_emits_nothing() -> anyhow::Result<()> {
    let compiled = compile! {
        "
        {}
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
              leave
              ret
            "
        }
    );

    Ok(())
}
