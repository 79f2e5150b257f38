//! End to end bundling scenarios.
//!
//! Driven with a stub toolchain script and a pre-seeded vendor cache, so no
//! network access and no real compiler are needed.

#![cfg(unix)]

use appshell_bundler::bundler::resources::GENERATED_FILE_NAME;
use appshell_bundler::bundler::{Bundler, Configuration, Environment, vendor};
use std::path::{Path, PathBuf};

/// Writes a stand-in for the real toolchain: a script that writes a dummy
/// binary at whatever path follows `-o`.
fn stub_toolchain(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = "#!/bin/sh\n\
                  out=\"\"\n\
                  prev=\"\"\n\
                  for arg in \"$@\"; do\n\
                  \tif [ \"$prev\" = \"-o\" ]; then\n\
                  \t\tout=\"$arg\"\n\
                  \tfi\n\
                  \tprev=\"$arg\"\n\
                  done\n\
                  printf 'compiled' > \"$out\"\n";
    let path = dir.join("toolchain.sh");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Pre-seeds the cache so vendor provisioning never reaches the network.
fn seed_cache(cache: &Path, environments: &[Environment]) {
    std::fs::create_dir_all(cache).unwrap();
    std::fs::write(cache.join(vendor::runtime_cache_name()), b"runtime").unwrap();
    for environment in environments {
        std::fs::write(
            cache.join(vendor::engine_cache_name(&environment.os, &environment.arch)),
            b"engine",
        )
        .unwrap();
    }
}

/// Builds a scenario configuration rooted at a scratch directory.
fn scenario(root: &Path, environments: Vec<Environment>) -> Configuration {
    let input = root.join("app/src/project");
    std::fs::create_dir_all(&input).unwrap();
    seed_cache(&root.join("cache"), &environments);

    Configuration {
        app_name: "Foo".into(),
        cache_path: Some(root.join("cache")),
        environments,
        input_path: Some(input),
        output_path: Some(root.join("out")),
        toolchain_path: Some(stub_toolchain(root)),
        ..Default::default()
    }
}

fn environment(os: &str, arch: &str) -> Environment {
    Environment {
        os: os.into(),
        arch: arch.into(),
    }
}

#[tokio::test]
async fn bundling_darwin_without_an_icon_produces_an_app_bundle() {
    let temp = tempfile::tempdir().unwrap();
    let configuration = scenario(temp.path(), vec![environment("darwin", "amd64")]);

    let bundler = Bundler::new(&configuration).unwrap();
    bundler.bundle().await.unwrap();

    let contents = temp.path().join("out/darwin-amd64/Foo.app/Contents");
    let binary = contents.join("MacOS/Foo");
    assert!(binary.is_file());

    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(&binary).unwrap().permissions().mode();
    assert_ne!(mode & 0o111, 0, "binary should be executable");

    let plist = std::fs::read_to_string(contents.join("Info.plist")).unwrap();
    assert!(plist.contains("<string>Foo</string>"));
    assert!(plist.contains("<string>com.Foo</string>"));
    assert!(!plist.contains("CFBundleIconFile"));
    assert!(!contents.join("Resources").exists());
}

#[tokio::test]
async fn bundling_linux_produces_a_flat_binary() {
    let temp = tempfile::tempdir().unwrap();
    let configuration = scenario(temp.path(), vec![environment("linux", "amd64")]);
    let input = configuration.input_path.clone().unwrap();

    let bundler = Bundler::new(&configuration).unwrap();
    bundler.bundle().await.unwrap();

    let environment_path = temp.path().join("out/linux-amd64");
    assert!(environment_path.join("Foo").is_file());

    // The flat binary is the sole artifact for this environment.
    let entries: Vec<_> = std::fs::read_dir(&environment_path)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(entries.len(), 1);

    // No resources directory, so no generated source either.
    assert!(!input.join(GENERATED_FILE_NAME).exists());

    // The vendor directory was materialized from the cache.
    assert!(input.join("vendor/runtime.zip").is_file());
    assert!(input.join("vendor/engine.zip").is_file());
}

#[tokio::test]
async fn bundling_processes_every_environment_in_order() {
    let temp = tempfile::tempdir().unwrap();
    let configuration = scenario(
        temp.path(),
        vec![environment("darwin", "amd64"), environment("linux", "arm64")],
    );

    let bundler = Bundler::new(&configuration).unwrap();
    bundler.bundle().await.unwrap();

    assert!(
        temp.path()
            .join("out/darwin-amd64/Foo.app/Contents/MacOS/Foo")
            .is_file()
    );
    assert!(temp.path().join("out/linux-arm64/Foo").is_file());
}

#[tokio::test]
async fn an_invalid_os_fails_construction_before_any_write() {
    let temp = tempfile::tempdir().unwrap();
    let mut configuration = scenario(temp.path(), vec![]);
    configuration.environments = vec![environment("freebsd", "amd64")];

    assert!(Bundler::new(&configuration).is_err());
    assert!(!temp.path().join("out").exists());
}

#[tokio::test]
async fn resources_are_embedded_into_generated_source() {
    let temp = tempfile::tempdir().unwrap();
    let configuration = scenario(temp.path(), vec![environment("linux", "amd64")]);
    let input = configuration.input_path.clone().unwrap();
    std::fs::create_dir_all(input.join("resources")).unwrap();
    std::fs::write(input.join("resources/greeting.txt"), b"hello").unwrap();

    let bundler = Bundler::new(&configuration).unwrap();
    bundler.bundle().await.unwrap();

    let generated = std::fs::read_to_string(input.join(GENERATED_FILE_NAME)).unwrap();
    assert!(generated.contains(r#""resources/greeting.txt""#));
    assert!(temp.path().join("out/linux-amd64/Foo").is_file());
}

#[tokio::test]
async fn a_missing_engine_archive_aborts_the_run() {
    let temp = tempfile::tempdir().unwrap();
    let configuration = scenario(temp.path(), vec![environment("linux", "amd64")]);

    // Drop the engine archive from the cache; provisioning now has to reach
    // its (nonexistent) download source and must fail.
    std::fs::remove_file(
        temp.path()
            .join("cache")
            .join(vendor::engine_cache_name("linux", "amd64")),
    )
    .unwrap();

    let bundler = Bundler::new(&configuration).unwrap();
    let err = bundler.bundle().await.unwrap_err();
    assert!(err.to_string().contains("linux/amd64"));

    // The failure aborts before compilation, so no binary was produced.
    assert!(!temp.path().join("out/linux-amd64/Foo").exists());
}
