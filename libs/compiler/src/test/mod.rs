#[macro_export]
macro_rules! compile {
    ($source:expr) => {{
        let tokenizer = tokenizer::Tokenizer::from(String::from($source));
        let mut parser = parser::Parser::new(tokenizer);
        let tree = parser
            .parse_all()?
            .expect("the parser always yields a root block");
        let assembly = crate::Compiler::new(None).compile(&tree)?;
        assembly.to_string()
    }};
}

mod blocks;
mod declaration;
mod end_to_end;
