use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};
use strum::{EnumMessage, IntoEnumIterator};

use crate::ui::cli::drivers::PromptDriver;
use crate::ui::types::choices::{FieldKind, FieldSpec, UIChoice, schema_for, specs_for_kind};
use crate::utils::parsing::{format_number_list, parse_number_list};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

struct KindItem<K> {
    kind: K,
    text: String,
}

impl<K> Display for KindItem<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

fn kind_items<K>() -> Vec<KindItem<K>>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let text = match k.get_detailed_message() {
                Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
                _ => label.to_string(),
            };
            KindItem { kind: k, text }
        })
        .collect()
}

/// Lets the user pick a variant of `C`, then asks for each of its parameters.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let mut select = inquire::Select::new(C::prompt_label(), kind_items::<C::Kind>());
    if let Some(help) = C::prompt_help() {
        select = select.with_help_message(help);
    }
    let choice_kind: C::Kind = select.prompt()?.kind;

    let key: &'static str = choice_kind.into();
    let schema = schema_for::<C>();
    let specs = specs_for_kind(&schema, key)?;
    let params = collect_params(driver, &specs, &C::default_params(choice_kind))?;
    C::from_parts(choice_kind, Value::Object(params))
}

/// Asks for every field in `specs`, pre-filled from the schema default or
/// from `defaults`. Blank answers to optional fields are left out.
pub fn collect_params<D: PromptDriver>(
    driver: &D,
    specs: &[FieldSpec],
    defaults: &Value,
) -> Result<Map<String, Value>> {
    let mut params = Map::new();
    for s in specs {
        let init = s
            .default
            .clone()
            .filter(|v| !v.is_null())
            .or_else(|| defaults.get(&s.name).cloned())
            .filter(|v| !v.is_null());
        let help = s.description.as_deref().unwrap_or("");

        let value = match s.kind {
            FieldKind::NumberList => Some(ask_number_list(driver, s, help, init.as_ref())?),
            FieldKind::Integer | FieldKind::Number if s.nullable && init.is_none() => {
                ask_optional_scalar(driver, s, help)?
            }
            FieldKind::Integer => {
                let def = init.and_then(|v| v.as_u64()).unwrap_or(0);
                Some(Value::from(driver.ask_u64(
                    &s.title,
                    help,
                    def,
                    s.min.map(|x| x as u64),
                    s.max.map(|x| x as u64),
                )?))
            }
            FieldKind::Number => {
                let def = init.and_then(|v| v.as_f64()).unwrap_or(0.0);
                Some(Value::from(driver.ask_f64(&s.title, help, def, s.min, s.max)?))
            }
        };

        if let Some(v) = value {
            params.insert(s.name.clone(), v);
        }
    }
    Ok(params)
}

fn ask_number_list<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    help: &str,
    init: Option<&Value>,
) -> Result<Value> {
    let def: Vec<f64> = init
        .and_then(|v| v.as_array())
        .map(|a| a.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default();

    loop {
        let answer = driver.ask_string(&s.title, help, &format_number_list(&def))?;
        match parse_number_list(&answer) {
            Ok(values) if !values.is_empty() || !s.required => return Ok(Value::from(values)),
            Ok(_) => eprintln!("✗ {} needs at least one value", s.title),
            Err(e) => eprintln!("✗ {e}"),
        }
    }
}

fn ask_optional_scalar<D: PromptDriver>(
    driver: &D,
    s: &FieldSpec,
    help: &str,
) -> Result<Option<Value>> {
    let answer = driver.ask_string(&s.title, &format!("{help}\n(leave blank for none)"), "")?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let value = match s.kind {
        FieldKind::Integer => {
            let n: u64 = answer
                .parse()
                .with_context(|| format!("invalid integer for {}", s.title))?;
            Value::from(n)
        }
        FieldKind::Number => {
            let x: f64 = answer
                .parse()
                .with_context(|| format!("invalid number for {}", s.title))?;
            Value::from(x)
        }
        FieldKind::NumberList => bail!("{} is not a scalar field", s.title),
    };
    Ok(Some(value))
}
