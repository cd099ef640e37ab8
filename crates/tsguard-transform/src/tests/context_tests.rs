use super::*;

const MARKER: &str = "./tsguard";

fn loader() -> MemoryModuleLoader {
    MemoryModuleLoader::new(MARKER)
        .with_file("/src/models.ts", "export interface User { name: string }")
        .with_file("/src/user.model.ts", "export type Id = string;")
        .with_file("/src/shapes/index.ts", "export type Shape = { sides: number };")
        .with_file("/src/legacy.ts", "export type Legacy = boolean;")
        .with_file("/lib/shared.ts", "export type Shared = number;")
        .with_file("/src/broken.ts", "export type = ;")
}

fn importer() -> &'static Path {
    Path::new("/src/main.ts")
}

#[test]
fn normalize_path_resolves_dots_lexically() {
    assert_eq!(
        normalize_path(Path::new("/a/b/../c/./d.ts")),
        PathBuf::from("/a/c/d.ts")
    );
    assert_eq!(normalize_path(Path::new("../x")), PathBuf::from("../x"));
    assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
}

#[test]
fn append_extension_keeps_dotted_names() {
    assert_eq!(
        append_extension(Path::new("/src/user.model"), "ts"),
        PathBuf::from("/src/user.model.ts")
    );
}

#[test]
fn extensionless_specifier_tries_typescript_extensions() {
    let loader = loader();
    let loaded = loader.load("./models", importer()).expect("models loads");
    assert_eq!(loaded.path, PathBuf::from("/src/models.ts"));
    assert!(loaded.scope.exported_type("User").is_some());

    let loaded = loader.load("./user.model", importer()).expect("dotted name loads");
    assert_eq!(loaded.path, PathBuf::from("/src/user.model.ts"));
}

#[test]
fn directory_specifier_falls_back_to_index() {
    let loaded = loader().load("./shapes", importer()).expect("index loads");
    assert_eq!(loaded.path, PathBuf::from("/src/shapes/index.ts"));
}

#[test]
fn javascript_extension_maps_to_typescript_source() {
    let loaded = loader().load("./legacy.js", importer()).expect("source found");
    assert_eq!(loaded.path, PathBuf::from("/src/legacy.ts"));
}

#[test]
fn parent_relative_specifier_is_followed() {
    let loaded = loader().load("../lib/shared", importer()).expect("shared loads");
    assert_eq!(loaded.path, PathBuf::from("/lib/shared.ts"));
}

#[test]
fn load_failures_are_typed() {
    let loader = loader();
    assert!(matches!(
        loader.load("lodash", importer()),
        Err(LoadError::Unsupported(specifier)) if specifier == "lodash"
    ));
    assert!(matches!(
        loader.load("./missing", importer()),
        Err(LoadError::NotFound { .. })
    ));
    assert!(matches!(
        loader.load("./broken", importer()),
        Err(LoadError::Parse(_))
    ));
}

#[test]
fn context_load_switches_to_target_module() {
    let loader = loader();
    let ctx = Context::new("/src/main.ts", ModuleScope::default(), &loader);
    let target = ctx.load("./shapes").expect("target loads");
    assert_eq!(target.path, PathBuf::from("/src/shapes/index.ts"));
    assert!(target.scope.exported_type("Shape").is_some());
}

#[test]
fn fs_loader_parses_each_file_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("types.ts"), "export type Name = string;").expect("write");
    let main = dir.path().join("main.ts");

    let loader = FsModuleLoader::new(MARKER);
    let first = loader.load("./types", &main).expect("first load");
    let second = loader.load("./types.ts", &main).expect("second load");
    assert_eq!(first.path, second.path);
    assert!(Arc::ptr_eq(&first.scope, &second.scope));
    assert_eq!(loader.cached_modules(), 1);
}

#[test]
fn fs_loader_reports_missing_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let loader = FsModuleLoader::new(MARKER);
    let err = loader
        .load("./nowhere", &dir.path().join("main.ts"))
        .expect_err("nothing to load");
    assert!(err.to_string().contains("cannot find module './nowhere'"));
}
