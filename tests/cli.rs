use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PAGE: &str = r#"{
    "data": [
        {
            "id": 1,
            "user": {"name": "Marta López"},
            "event": "updated",
            "auditable_type": "App\\Models\\Device",
            "auditable_name": "INV-001",
            "old_values": {"status": "disponible"},
            "new_values": {"status": "asignado", "employee_id": "e1", "category_id": "c9"},
            "created_at": "2025-03-14T09:30:00Z"
        },
        {
            "id": 2,
            "user": null,
            "event": "created",
            "auditable_type": "App\\Models\\Assignment",
            "old_values": [],
            "new_values": {"note": "Entrega", "device_id": "d1"},
            "created_at": "2025-03-14T09:30:00Z"
        },
        {
            "id": 3,
            "user": {"name": "Luis"},
            "event": "created",
            "auditable_type": "App\\Models\\Unit",
            "old_values": null,
            "new_values": {"name": null},
            "created_at": "2025-03-15 10:00:00"
        }
    ],
    "current_page": 1,
    "last_page": 1,
    "total": 3,
    "from": 1,
    "to": 3
}"#;

fn setup() -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let page = dir.path().join("audits.json");
    std::fs::write(&page, PAGE).unwrap();
    (dir, page)
}

fn assetdesk(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("assetdesk").unwrap();
    cmd.env("ASSETDESK_DATA_DIR", dir.path())
        .env_remove("ASSETDESK_API_URL")
        .env_remove("ASSETDESK_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn render_shows_readable_details() {
    let (dir, page) = setup();

    assetdesk(&dir)
        .args(["audit", "render"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("Marta López"))
        .stdout(predicate::str::contains("Estado: disponible → asignado"))
        .stdout(predicate::str::contains("Empleado: vacío → [e1]"))
        .stdout(predicate::str::contains("Nueva asignación realizada"))
        .stdout(predicate::str::contains("Registro creado"))
        .stdout(predicate::str::contains("Sistema"))
        .stdout(predicate::str::contains("category").not())
        .stdout(predicate::str::contains("Página 1 de 1"));
}

#[test]
fn render_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    assetdesk(&dir)
        .args(["audit", "render", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn export_csv_from_saved_page() {
    let (dir, page) = setup();
    let output = dir.path().join("audits.csv");

    assetdesk(&dir)
        .args(["audit", "export"])
        .arg(&output)
        .arg("--input")
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 audit records"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.contains(r#""Responsable","Acción","Módulo","Detalles","Fecha""#));
    assert!(contents.contains(r#""Dispositivo · INV-001""#));
    assert!(contents.contains("14/03/2025 09:30"));
}

#[test]
fn export_json_from_saved_page() {
    let (dir, page) = setup();
    let output = dir.path().join("audits.json.out");

    assetdesk(&dir)
        .args(["audit", "export", "--format", "json", "--pretty", "--input"])
        .arg(&page)
        .arg(&output)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["record_count"], 3);
    assert_eq!(value["records"][1]["details_items"]["kind"], "assignment_created");
}

#[test]
fn list_requires_manager_role() {
    let dir = TempDir::new().unwrap();

    assetdesk(&dir)
        .args(["audit", "list", "--role", "Soporte"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Permission denied"));
}

#[test]
fn list_rejects_bad_date() {
    let dir = TempDir::new().unwrap();

    assetdesk(&dir)
        .args(["audit", "list", "--role", "admin", "--date", "14/03/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn init_writes_settings_and_vocabulary() {
    let dir = TempDir::new().unwrap();

    assetdesk(&dir).arg("init").assert().success();

    assert!(dir.path().join("config.json").exists());
    let vocabulary = std::fs::read_to_string(dir.path().join("vocabulary.json")).unwrap();
    assert!(vocabulary.contains("Dispositivo"));

    assetdesk(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifier threshold: 30"));
}
