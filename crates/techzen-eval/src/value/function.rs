//! Function value data.
//!
//! A `Function` is just its defining pieces plus the context it closed
//! over; invoking one is the interpreter's job (see
//! `interpreter::funcs::call_function`), mirroring how `function_.py`
//! only carries state while `BaseFunction.generate_new_context` and the
//! `Interpreter` do the work.

use std::rc::Rc;

use techzen_par::Node;

use crate::context::Context;

pub struct FunctionData {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Rc<Node>,
    pub should_auto_return: bool,
    pub captured_ctx: Rc<Context>,
}

impl FunctionData {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<anonymous>")
    }
}

/// The fixed table of named built-ins, dispatched by name rather than by
/// reflection (see `spec.md` §9 "AST dispatch" note, applied here too).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinId {
    Print,
    PrintRet,
    Input,
    InputInt,
    Clear,
    IsNumber,
    IsString,
    IsList,
    IsFunction,
    IsDict,
    Append,
    Pop,
    Extend,
    UpdateList,
    Len,
    Lower,
    Upper,
    StringOf,
    Run,
    Exit,
}

impl BuiltinId {
    pub const ALL: [BuiltinId; 20] = [
        BuiltinId::Print,
        BuiltinId::PrintRet,
        BuiltinId::Input,
        BuiltinId::InputInt,
        BuiltinId::Clear,
        BuiltinId::IsNumber,
        BuiltinId::IsString,
        BuiltinId::IsList,
        BuiltinId::IsFunction,
        BuiltinId::IsDict,
        BuiltinId::Append,
        BuiltinId::Pop,
        BuiltinId::Extend,
        BuiltinId::UpdateList,
        BuiltinId::Len,
        BuiltinId::Lower,
        BuiltinId::Upper,
        BuiltinId::StringOf,
        BuiltinId::Run,
        BuiltinId::Exit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinId::Print => "print",
            BuiltinId::PrintRet => "print_ret",
            BuiltinId::Input => "input",
            BuiltinId::InputInt => "input_int",
            BuiltinId::Clear => "clear",
            BuiltinId::IsNumber => "is_number",
            BuiltinId::IsString => "is_string",
            BuiltinId::IsList => "is_list",
            BuiltinId::IsFunction => "is_function",
            BuiltinId::IsDict => "is_dict",
            BuiltinId::Append => "append",
            BuiltinId::Pop => "pop",
            BuiltinId::Extend => "extend",
            BuiltinId::UpdateList => "update_list",
            BuiltinId::Len => "len",
            BuiltinId::Lower => "lower",
            BuiltinId::Upper => "upper",
            BuiltinId::StringOf => "string",
            BuiltinId::Run => "run",
            BuiltinId::Exit => "exit",
        }
    }

    /// Declared parameter names, checked uniformly by arity before the
    /// built-in body runs (matching `BaseFunction.check_args`).
    pub fn param_names(self) -> &'static [&'static str] {
        match self {
            BuiltinId::Print | BuiltinId::PrintRet | BuiltinId::Input => &["value"],
            BuiltinId::InputInt => &["value"],
            BuiltinId::Clear => &[],
            BuiltinId::IsNumber
            | BuiltinId::IsString
            | BuiltinId::IsList
            | BuiltinId::IsFunction
            | BuiltinId::IsDict => &["value"],
            BuiltinId::Append => &["list", "value"],
            BuiltinId::Pop => &["list", "index"],
            BuiltinId::Extend => &["listA", "listB"],
            BuiltinId::UpdateList => &["list", "index", "replacement"],
            BuiltinId::Len => &["list"],
            BuiltinId::Lower | BuiltinId::Upper | BuiltinId::StringOf => &["value"],
            BuiltinId::Run => &["fn"],
            BuiltinId::Exit => &[],
        }
    }
}
