// `.d.lua` stub emitter for the Lua language server

use crate::model::ApiModel;

/// Render the model as a LuaLS meta/stub document.
///
/// `module_name` adds a `---@module` line when present and non-empty. The
/// result always ends with exactly one newline.
pub fn emit_stub(model: &ApiModel, module_name: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("---@meta".to_string());
    if let Some(name) = module_name.filter(|n| !n.is_empty()) {
        lines.push(format!("---@module \"{}\"", name));
    }
    lines.push(String::new());

    if !model.globals.is_empty() {
        lines.push("-- C++ bindings (globals)".to_string());
        for name in &model.globals {
            push_global(&mut lines, name);
        }
    }

    if !model.lua_globals.is_empty() {
        lines.push("-- Lua helpers (globals)".to_string());
        for name in &model.lua_globals {
            push_global(&mut lines, name);
        }
    }

    for (type_name, usertype) in &model.usertypes {
        push_class_header(&mut lines, type_name);

        for field in &usertype.fields {
            lines.push(format!("---@field {} any", field));
        }
        if !usertype.fields.is_empty() {
            lines.push(String::new());
        }

        for signature in &usertype.constructors {
            lines.push(format!("-- ctor: {}", signature));
        }
        if !usertype.constructors.is_empty() {
            lines.push(String::new());
        }

        for method in &usertype.methods {
            push_function(&mut lines, &format!("{}:{}", type_name, method));
        }

        push_class_footer(&mut lines, type_name);
    }

    for (module_name, module) in &model.lua_modules {
        push_class_header(&mut lines, module_name);
        for function in &module.functions {
            push_function(&mut lines, &format!("{}.{}", module_name, function));
        }
        push_class_footer(&mut lines, module_name);
    }

    let mut out = lines.join("\n").trim_end().to_string();
    out.push('\n');
    out
}

fn push_global(lines: &mut Vec<String>, name: &str) {
    lines.push("---@return any".to_string());
    lines.push(format!("function {}(...) end", name));
    lines.push(String::new());
}

fn push_function(lines: &mut Vec<String>, qualified: &str) {
    lines.push("---@param ... any".to_string());
    lines.push("---@return any".to_string());
    lines.push(format!("function {}(...) end", qualified));
    lines.push(String::new());
}

fn push_class_header(lines: &mut Vec<String>, name: &str) {
    lines.push(format!("---@class {}", name));
    lines.push(format!("local {} = {{}}", name));
    lines.push(String::new());
}

fn push_class_footer(lines: &mut Vec<String>, name: &str) {
    lines.push(format!("return {}", name));
    lines.push(String::new());
}
