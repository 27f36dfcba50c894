//! Operator evaluation.
//!
//! `&&`, `||`, `??`, `?:` and the conditional evaluate their right operand
//! only when needed. Everything else evaluates both operands and hands them
//! to the value model; `None` from the value model (operator undefined for
//! the operand types) becomes `INVALID_ARGUMENTS`.

use lang_ir::{OperationNode, Operator, OperatorArity};
use lang_value::{DataObject, ErrorObject, InterpretingError, ScopeId};

use crate::interpreter::Interpreter;
use crate::EvalResult;

fn apply_unary(operator: Operator, operand: &DataObject) -> Option<DataObject> {
    match operator {
        Operator::Pos => operand.op_pos(),
        Operator::Inv => operand.op_inv(),
        Operator::Not => operand.op_not(),
        Operator::BitwiseNot => operand.op_bitwise_not(),
        Operator::DeepCopy => Some(operand.deep_copy()),
        Operator::Len => operand.op_len(),
        Operator::Inc => operand.op_inc(),
        Operator::Dec => operand.op_dec(),
        _ => None,
    }
}

fn apply_binary(operator: Operator, left: &DataObject, right: &DataObject) -> Option<DataObject> {
    let comparison = |result: bool| Some(DataObject::bool(result));
    match operator {
        Operator::GetItem => left.op_get_item(right),
        Operator::Pow => left.op_pow(right),
        Operator::Mul => left.op_mul(right),
        Operator::Div => left.op_div(right),
        Operator::FloorDiv => left.op_floor_div(right),
        Operator::Mod => left.op_mod(right),
        Operator::Add => left.op_add(right),
        Operator::Sub => left.op_sub(right),
        Operator::Concat => left.op_concat(right),
        Operator::Lshift => left.op_lshift(right),
        Operator::Rshift => left.op_rshift(right),
        Operator::Rzshift => left.op_rzshift(right),
        Operator::BitwiseAnd => left.op_and(right),
        Operator::BitwiseXor => left.op_xor(right),
        Operator::BitwiseOr => left.op_or(right),
        Operator::Less => comparison(left.less_than(right)),
        Operator::Greater => comparison(left.greater_than(right)),
        Operator::LessEquals => comparison(left.less_than_or_equals(right)),
        Operator::GreaterEquals => comparison(left.greater_than_or_equals(right)),
        Operator::Equals => comparison(left.loose_equals(right)),
        Operator::NotEquals => comparison(!left.loose_equals(right)),
        Operator::StrictEquals => comparison(left.strict_equals(right)),
        Operator::StrictNotEquals => comparison(!left.strict_equals(right)),
        _ => None,
    }
}

impl Interpreter {
    pub(crate) fn eval_operation(&mut self, operation: &OperationNode, scope: ScopeId) -> EvalResult {
        let operator = operation.operator;
        match operator.arity() {
            OperatorArity::Unary => {
                let operand = self.eval_value(&operation.left, scope)?;
                let result = apply_unary(operator, &operand);
                Ok(Some(self.finish_operation(operator, result, scope)))
            }
            OperatorArity::Binary => {
                let Some(right) = operation.right.as_deref() else {
                    return Ok(Some(self.raise_error(InterpretingError::InvalidAstNode, None, scope)));
                };
                let left = self.eval_value(&operation.left, scope)?;
                match operator {
                    Operator::And => {
                        if !left.to_boolean() {
                            return Ok(Some(DataObject::bool(false)));
                        }
                        let right = self.eval_value(right, scope)?;
                        Ok(Some(DataObject::bool(right.to_boolean())))
                    }
                    Operator::Or => {
                        if left.to_boolean() {
                            return Ok(Some(DataObject::bool(true)));
                        }
                        let right = self.eval_value(right, scope)?;
                        Ok(Some(DataObject::bool(right.to_boolean())))
                    }
                    Operator::NullCoalescing => {
                        if left.is_null() || left.is_void() {
                            self.eval_node(right, scope)
                        } else {
                            Ok(Some(left))
                        }
                    }
                    Operator::Elvis => {
                        if left.to_boolean() {
                            Ok(Some(left))
                        } else {
                            self.eval_node(right, scope)
                        }
                    }
                    _ => {
                        let right = self.eval_value(right, scope)?;
                        let result = apply_binary(operator, &left, &right);
                        Ok(Some(self.finish_operation(operator, result, scope)))
                    }
                }
            }
            OperatorArity::Ternary => {
                let (Some(if_true), Some(if_false)) =
                    (operation.middle.as_deref(), operation.right.as_deref())
                else {
                    return Ok(Some(self.raise_error(InterpretingError::InvalidAstNode, None, scope)));
                };
                if self.eval_value(&operation.left, scope)?.to_boolean() {
                    self.eval_node(if_true, scope)
                } else {
                    self.eval_node(if_false, scope)
                }
            }
        }
    }

    /// Report undefined operations and stamp errno for errors the operator
    /// produced (division by zero, bad repeat count, index out of range).
    fn finish_operation(
        &mut self,
        operator: Operator,
        result: Option<DataObject>,
        scope: ScopeId,
    ) -> DataObject {
        let Some(value) = result else {
            let message = format!("operator `{}` is not defined for these operands", operator.symbol());
            return self.raise_error(InterpretingError::InvalidArguments, Some(&message), scope);
        };
        // Indexing may return an Error element stored in the array.
        let produced = value.as_error().map(ErrorObject::kind).filter(|&kind| {
            operator != Operator::GetItem || kind == InterpretingError::IndexOutOfBounds
        });
        if let Some(kind) = produced {
            self.stamp_errno(kind, scope);
        }
        value
    }
}
