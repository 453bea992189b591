#[cfg(test)]
mod test;

mod variable_manager;

pub use variable_manager::VariableFrame;

use asm::{Assembly, Instruction};
use parser::tree_node::{
    AssignmentExpression, BinaryExpression, BlockExpression, Expression, IfExpression,
};
use quick_error::quick_error;

quick_error! {
    #[derive(Debug)]
    pub enum CompileError {
        UndeclaredVariable(variable: String) {
            display("Variable {} was never declared.", variable)
        }
    }
}

pub struct CompilerConfig {
    /// Symbol name of the emitted entry point
    pub entry_point: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            entry_point: String::from("main"),
        }
    }
}

/// Lowers an expression tree into a flat instruction sequence.
///
/// The walk is a single depth-first pass; the only thing computed ahead of
/// it is the variable frame, because slot offsets must be known before any
/// load or store can be emitted. Every lowering rule leaves the node's value
/// in working register A.
pub struct Compiler {
    config: CompilerConfig,
    frame: VariableFrame,
    output: Assembly,
    label_counter: usize,
}

impl Compiler {
    pub fn new(config: Option<CompilerConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
            frame: VariableFrame::default(),
            output: Assembly::default(),
            label_counter: 0,
        }
    }

    /// Compiles one tree into a complete assembly listing: entry symbol,
    /// frame setup sized to the declared variables, the lowered body, and
    /// the fall-off-the-end teardown.
    pub fn compile(mut self, tree: &Expression) -> Result<Assembly, CompileError> {
        self.frame = VariableFrame::new(tree);

        self.emit(Instruction::Preamble);
        self.emit(Instruction::FunctionPrologue(
            self.config.entry_point.clone(),
        ));
        self.emit(Instruction::EnterFrame(self.frame.len()));

        self.expression(tree)?;

        self.emit(Instruction::LeaveFrame);
        self.emit(Instruction::Return);

        Ok(self.output)
    }

    fn emit(&mut self, instruction: Instruction) {
        self.output.push(instruction);
    }

    /// Produces a fresh label name. The counter is shared by every label in
    /// the compilation unit, so nested and sibling conditionals can never
    /// collide.
    fn next_label(&mut self, prefix: &str) -> String {
        let label = format!("{}{}", prefix, self.label_counter);
        self.label_counter += 1;
        label
    }

    fn expression(&mut self, expression: &Expression) -> Result<(), CompileError> {
        match expression {
            Expression::Number(value) => {
                self.emit(Instruction::LoadImmediate(*value));
                Ok(())
            }
            Expression::Variable(name) => {
                let slot = self.frame.offset_of(name)?;
                self.emit(Instruction::LoadSlot(slot));
                Ok(())
            }
            Expression::Binary(expr) => self.expression_binary(expr),
            Expression::Assignment(expr) => self.expression_assignment(expr),
            Expression::Declaration(name, value) => self.expression_declaration(name, value),
            Expression::Block(expr) => self.expression_block(expr),
            Expression::Return(value) => self.expression_return(value),
            Expression::If(expr) => self.expression_if(expr),
            Expression::Undefined => Ok(()),
        }
    }

    /// Both operands are evaluated into register A. The left result is
    /// parked in B across the right-hand evaluation, and the second swap
    /// restores left/right positional order before the combine — which is
    /// what keeps subtraction and division operands straight.
    fn expression_binary(&mut self, expression: &BinaryExpression) -> Result<(), CompileError> {
        let (left, right) = expression.operands();

        self.expression(left)?;
        self.emit(Instruction::Swap);
        self.expression(right)?;
        self.emit(Instruction::Swap);

        let combine = match expression {
            BinaryExpression::Add(..) => Instruction::Add,
            BinaryExpression::Subtract(..) => Instruction::Subtract,
            BinaryExpression::Multiply(..) => Instruction::Multiply,
            BinaryExpression::Divide(..) => Instruction::Divide,
        };
        self.emit(combine);

        Ok(())
    }

    fn expression_assignment(
        &mut self,
        expression: &AssignmentExpression,
    ) -> Result<(), CompileError> {
        // an undefined value emits nothing, so the store keeps whatever
        // register A already holds
        self.expression(&expression.expression)?;

        let slot = self.frame.offset_of(&expression.identifier)?;
        self.emit(Instruction::StoreSlot(slot));

        Ok(())
    }

    fn expression_declaration(
        &mut self,
        name: &str,
        value: &Expression,
    ) -> Result<(), CompileError> {
        self.expression(value)?;

        let slot = self.frame.offset_of(name)?;
        self.emit(Instruction::StoreSlot(slot));

        Ok(())
    }

    fn expression_block(&mut self, expression: &BlockExpression) -> Result<(), CompileError> {
        for expr in &expression.0 {
            self.expression(expr)?;
        }

        Ok(())
    }

    /// An early return tears the frame down before `ret`; whatever follows
    /// in the enclosing block is still lowered, it is just unreachable.
    fn expression_return(&mut self, value: &Expression) -> Result<(), CompileError> {
        self.expression(value)?;
        self.emit(Instruction::LeaveFrame);
        self.emit(Instruction::Return);

        Ok(())
    }

    fn expression_if(&mut self, expression: &IfExpression) -> Result<(), CompileError> {
        self.expression(&expression.condition)?;

        let false_label = self.next_label("false");
        let end_label = self.next_label("end");

        self.emit(Instruction::JumpIfZero(false_label.clone()));
        self.expression(&expression.body)?;

        match &expression.else_branch {
            Some(else_branch) => {
                self.emit(Instruction::Jump(end_label.clone()));
                self.emit(Instruction::Label(false_label));
                self.expression(else_branch)?;
                self.emit(Instruction::Label(end_label));
            }
            None => {
                // the condition-false path just skips the body; there is
                // nothing to join
                self.emit(Instruction::Label(false_label));
            }
        }

        Ok(())
    }
}
