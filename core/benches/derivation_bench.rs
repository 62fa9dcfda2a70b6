// Derivation benchmarks.
//
// Covers seed validation, Ed25519 keypair derivation, DID creation for both
// methods, did:key parsing and DID document generation.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use didseed::{
    create_local_did, keypair_from_seed, validate_seed, DidKey, DidMethod, KeyType, Seed,
    SeedInput,
};

const TRUSTEE_SEED: &str = "000000000000000000000000Trustee1";
const TRUSTEE_DID_KEY: &str = "did:key:z6MkukGVb3mRvTu1msArDKY9UwxeZFGjmwnCKtdQttr4Fk6i";

fn bench_validate_seed(c: &mut Criterion) {
    let text = SeedInput::from(TRUSTEE_SEED);
    let b64 = SeedInput::from("MDAwMDAwMDAwMDAwMDAwMDAwMDAwMDAwVHJ1c3RlZTE=");

    c.bench_function("seed/validate_text", |b| {
        b.iter(|| validate_seed(Some(&text)).unwrap());
    });
    c.bench_function("seed/validate_base64", |b| {
        b.iter(|| validate_seed(Some(&b64)).unwrap());
    });
}

fn bench_keypair_from_seed(c: &mut Criterion) {
    let seed = Seed::from_bytes([42u8; 32]);

    c.bench_function("ed25519/keypair_from_seed", |b| {
        b.iter(|| keypair_from_seed(&seed));
    });
}

fn bench_create_local_did(c: &mut Criterion) {
    let seed = SeedInput::from(TRUSTEE_SEED);

    for method in DidMethod::ALL {
        c.bench_function(&format!("did/create_local_{method}"), |b| {
            b.iter(|| create_local_did(method, KeyType::Ed25519, Some(&seed), None, None).unwrap());
        });
    }
}

fn bench_parse_did_key(c: &mut Criterion) {
    c.bench_function("did/parse_did_key", |b| {
        b.iter(|| DidKey::from_did(TRUSTEE_DID_KEY).unwrap());
    });
}

fn bench_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("did/document");

    for count in [1, 10, 100] {
        let infos: Vec<_> = (0..count)
            .map(|i| {
                let seed = SeedInput::Bytes(vec![i as u8; 32]);
                create_local_did(DidMethod::Key, KeyType::Ed25519, Some(&seed), None, None)
                    .unwrap()
            })
            .collect();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &infos, |b, infos| {
            b.iter(|| {
                for info in infos {
                    info.to_document().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_seed,
    bench_keypair_from_seed,
    bench_create_local_did,
    bench_parse_did_key,
    bench_documents,
);
criterion_main!(benches);
