use std::process::exit;

use lattice_core::{ArtifactKind, ArtifactName, ArtifactResponse, DispatchId, ErrorDetail, QueryError, ReadLimits};
use lattice_persistence::PgQueryService;
use log::debug;
use serde_json::{json, Map, Value};

const USAGE: &str = "Uso:\n  lattice summary --dispatch <UUID>\n  lattice artifact --dispatch <UUID> (--name <NAME> | --all)";

/// Nombres que acepta la capa de transporte. `call_before` / `call_after`
/// pasan la validación pero no tienen entrada en la tabla de despacho.
const EXTRA_TRANSPORT_NAMES: [&str; 2] = ["call_before", "call_after"];

#[derive(Debug, PartialEq)]
enum Command {
    Summary { dispatch_id: DispatchId },
    Artifact { dispatch_id: DispatchId, name: ArtifactName },
    AllArtifacts { dispatch_id: DispatchId },
}

fn is_transport_name(name: &str) -> bool {
    ArtifactKind::ALL.iter().any(|k| k.as_str() == name) || EXTRA_TRANSPORT_NAMES.contains(&name)
}

/// Errores de validación con la misma forma que los errores de consulta.
fn validation_error(field: &str, message: String) -> ErrorDetail {
    ErrorDetail { location: vec!["path".into(), field.into()],
                  message,
                  kind: Some("value_error".into()) }
}

fn parse_args(args: &[String]) -> Result<Command, ErrorDetail> {
    let sub = args.get(1).map(String::as_str);
    let mut dispatch: Option<String> = None;
    let mut name: Option<String> = None;
    let mut all = false;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--dispatch" => {
                i += 1;
                dispatch = args.get(i).cloned();
            }
            "--name" => {
                i += 1;
                name = args.get(i).cloned();
            }
            "--all" => all = true,
            other => return Err(validation_error("args", format!("argumento desconocido: {other}"))),
        }
        i += 1;
    }
    let dispatch = dispatch.ok_or_else(|| validation_error("dispatch_id", "falta --dispatch".into()))?;
    let dispatch_id = DispatchId::parse(&dispatch).map_err(|e| validation_error("dispatch_id", e.to_string()))?;

    match (sub, name, all) {
        (Some("summary"), None, false) => Ok(Command::Summary { dispatch_id }),
        (Some("artifact"), Some(name), false) => {
            if !is_transport_name(&name) {
                return Err(validation_error("name", format!("unexpected artifact name: {name}")));
            }
            Ok(Command::Artifact { dispatch_id,
                                   name: ArtifactName::parse(&name) })
        }
        (Some("artifact"), None, true) => Ok(Command::AllArtifacts { dispatch_id }),
        _ => Err(validation_error("args", USAGE.into())),
    }
}

fn exit_code(err: &QueryError) -> i32 {
    if err.is_not_found() || err.is_missing_file() {
        4
    } else {
        5
    }
}

fn fail(detail: &ErrorDetail, code: i32) -> ! {
    eprintln!("{}", json!({ "detail": [detail] }));
    exit(code)
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("[lattice] serialización: {e}");
            exit(5)
        }
    }
}

fn run(service: &PgQueryService, cmd: Command) {
    match cmd {
        Command::Summary { dispatch_id } => match service.get_summary(dispatch_id) {
            Ok(summary) => print_json(&summary),
            Err(e) => fail(&e.detail(), exit_code(&e)),
        },
        Command::Artifact { dispatch_id, name } => match service.get_artifact(dispatch_id, &name) {
            Ok(resp) => print_json(&resp),
            Err(e) => fail(&e.detail(), exit_code(&e)),
        },
        Command::AllArtifacts { dispatch_id } => match service.get_artifacts(dispatch_id, &ArtifactKind::ALL) {
            Ok(results) => print_json(&artifacts_by_kind(results)),
            Err(e) => fail(&e.detail(), exit_code(&e)),
        },
    }
}

/// Objeto `{kind: respuesta | {"detail": [...]}}` para `--all`.
fn artifacts_by_kind(results: Vec<(ArtifactKind, Result<ArtifactResponse, QueryError>)>) -> Value {
    let mut out = Map::new();
    for (kind, res) in results {
        let value = match res.map(serde_json::to_value) {
            Ok(Ok(v)) => v,
            Ok(Err(e)) => json!({ "detail": [ErrorDetail { location: vec!["path".into(), "name".into()],
                                                           message: format!("{kind}: {e}"),
                                                           kind: Some("serialization_error".into()) }] }),
            Err(e) => json!({ "detail": [e.detail()] }),
        };
        out.insert(kind.as_str().to_string(), value);
    }
    Value::Object(out)
}

fn main() {
    // Cargar .env si existe para obtener DATABASE_URL
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();
    let cmd = match parse_args(&args) {
        Ok(c) => c,
        Err(detail) => fail(&detail, 2),
    };
    debug!("lattice:start cmd={cmd:?}");

    let limits = match ReadLimits::from_env() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("[lattice] config: {e}");
            exit(5)
        }
    };
    let pool = match lattice_persistence::build_dev_pool_from_env() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[lattice] pool error: {e}");
            exit(5)
        }
    };
    let service = lattice_persistence::build_query_service(pool, limits);
    run(&service, cmd);
}
