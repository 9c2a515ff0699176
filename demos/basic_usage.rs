use remote_failure::{ErrorFormatter, Failure, Result, StaticCatalog};
use tracing_subscriber::EnvFilter;

const CATALOG: &str = r#"{
    "HOST_OFFLINE": "Host {0} is offline.",
    "VM_BAD_POWER_STATE": "VM {0} must be {1} to perform this operation, but it is {2}."
}"#;

fn start_vm(formatter: &ErrorFormatter<'_>, name: &str) -> Result<()> {
    // Simulate the tokens a server sends back for a rejected call
    Err(Failure::with_formatter(
        ["VM_BAD_POWER_STATE", name, "halted", "running"],
        formatter,
    ))
}

fn main() {
    // Degradation paths report through tracing; RUST_LOG=debug shows them
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = match StaticCatalog::from_json_str(CATALOG) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("catalog failed to load: {}", e);
            return;
        }
    };
    let formatter = ErrorFormatter::with_catalog(&catalog);

    println!("--- Basic Usage Example ---\n");

    // 1. Translated fault
    if let Err(failure) = start_vm(&formatter, "web-01") {
        println!("1. [TRANSLATED]     {}", failure);
        failure.log_entry().emit();
    }

    // 2. Untranslated fault: tokens are trimmed, blanks dropped, then joined
    let failure = Failure::with_formatter(["VDI_IN_USE", " OpaqueRef:9f2\n", "", "destroy"], &formatter);
    println!("2. [UNTRANSLATED]   {}", failure);

    // 3. Storage backend fault carrying a JSON document
    let failure = Failure::with_formatter(
        [
            "SR_BACKEND_FAILURE",
            "TransportException",
            r#"{"error": "Unable to connect to iSCSI service on target"}"#,
        ],
        &formatter,
    );
    println!("3. [BACKEND]        {}", failure);

    // 4. Persisted and restored without recomputation
    match serde_json::to_string(&failure) {
        Ok(json) => {
            println!("4. [PERSISTED]      {}", json);
            if let Ok(restored) = serde_json::from_str::<Failure>(&json) {
                println!("   [RESTORED]       {}", restored);
            }
        }
        Err(e) => eprintln!("serialization failed: {}", e),
    }
}
