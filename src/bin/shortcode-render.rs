use std::collections::HashMap;
use std::env;
use std::fs;
use std::process;
use std::rc::Rc;

use serde::Deserialize;

use shortcodes::{
    dispatch_component, CanonicalRequest, ComponentRegistry, ContentFrame, EngineError,
    HandlerStyle, InlineArg, PassthroughExpander, RawValue, RenderContext,
};

/// One component invocation as written in an invocation file.
#[derive(Debug, Deserialize)]
struct InvocationSpec {
    component: String,
    #[serde(default)]
    input: String,
    #[serde(default)]
    attributes: HashMap<String, RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct InvocationFile {
    #[serde(default)]
    skin: Option<String>,
    invocations: Vec<InvocationSpec>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: shortcode-render <file.yaml>...");
        eprintln!();
        eprintln!("Each file holds a list of component invocations:");
        eprintln!("  invocations:");
        eprintln!("    - component: alert");
        eprintln!("      attributes: {{ color: warning }}");
        eprintln!("      input: \"Check your settings.\"");
        process::exit(1);
    }

    let registry = match ComponentRegistry::with_builtins() {
        Ok(registry) => Rc::new(registry),
        Err(e) => {
            eprintln!("✗ failed to build the component registry: {}", e);
            process::exit(1);
        }
    };

    let mut exit_code = 0;
    for file_path in &args[1..] {
        match render_file(&registry, file_path) {
            Ok(output) => {
                println!("✓ {}", file_path);
                print!("{}", output);
            }
            Err(e) => {
                eprintln!("✗ {} failed:", file_path);
                eprintln!("  {}", e);
                exit_code = 1;
            }
        }
    }
    process::exit(exit_code);
}

fn render_file(registry: &Rc<ComponentRegistry>, path: &str) -> Result<String, EngineError> {
    let content = fs::read_to_string(path)
        .map_err(|e| EngineError::InvalidRequest {
            reason: format!("failed to read '{}': {}", path, e),
        })?;
    let file: InvocationFile = serde_yaml::from_str(&content)?;

    // One fresh context per file: each file is one document render.
    let mut context = RenderContext::new(Box::new(PassthroughExpander));
    if let Some(skin) = file.skin {
        context = context.with_skin(skin);
    }
    let context = Rc::new(context);

    let mut output = String::new();
    for spec in &file.invocations {
        let request = build_request(registry, spec, &context)?;
        let fragment = dispatch_component(registry, &spec.component, &request)?;
        output.push_str(fragment.text());
        output.push('\n');
    }

    let deferred = context.drain_deferred();
    if !deferred.is_empty() {
        output.push_str(&deferred);
        output.push('\n');
    }
    Ok(output)
}

fn build_request(
    registry: &Rc<ComponentRegistry>,
    spec: &InvocationSpec,
    context: &Rc<RenderContext>,
) -> Result<CanonicalRequest, EngineError> {
    match registry.handler_style(&spec.component)? {
        HandlerStyle::Block => Ok(CanonicalRequest::from_block(
            spec.input.clone(),
            spec.attributes.clone(),
            Rc::clone(context),
            ContentFrame::new(),
        )),
        HandlerStyle::Inline => {
            // The input slot is always filled (an empty string parses to no
            // attribute) and attributes follow in key order, so the argument
            // list does not depend on map iteration order.
            let mut args = vec![
                InlineArg::Context(Rc::clone(context)),
                InlineArg::text(spec.input.clone()),
            ];
            let mut pairs: Vec<_> = spec.attributes.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in pairs {
                match value {
                    RawValue::Str(s) => args.push(InlineArg::text(format!("{}={}", key, s))),
                    RawValue::Bool(true) => args.push(InlineArg::text(key.clone())),
                    RawValue::Bool(false) => {
                        args.push(InlineArg::text(format!("{}=false", key)))
                    }
                }
            }
            CanonicalRequest::from_inline(args)
        }
    }
}
