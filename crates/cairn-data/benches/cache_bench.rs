use cairn_core::{LoadError, Resource, ResourceData, ResourceLoader, ResourceType, TextureData};
use cairn_data::resources::ResourceCache;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::path::Path;
use std::sync::Arc;

struct TinyTexture;

impl ResourceLoader for TinyTexture {
    fn kind(&self) -> ResourceType {
        ResourceType::Texture
    }

    fn load(&self, _path: &Path) -> Result<ResourceData, LoadError> {
        Ok(TextureData::solid(1, 1, [0; 4]).into())
    }
}

fn filled_cache(count: usize) -> ResourceCache {
    let loader: Arc<dyn ResourceLoader> = Arc::new(TinyTexture);
    let mut cache = ResourceCache::new();
    for i in 0..count {
        let path = format!("textures/{i}.png");
        let resource = Resource::new(path.clone(), path, loader.clone());
        let _ = resource.load();
        // The returned handle is dropped, so every entry starts out unused.
        cache.insert(Arc::new(resource));
    }
    cache
}

fn bench_cache(c: &mut Criterion) {
    let mut cache = filled_cache(10_000);
    let paths: Vec<String> = (0..10_000).map(|i| format!("textures/{i}.png")).collect();

    let mut group = c.benchmark_group("Resource Cache");

    group.bench_function("get (10k entries)", |b| {
        b.iter(|| {
            for path in &paths {
                black_box(cache.get(path));
            }
        });
    });

    group.bench_function("total_memory_usage (10k entries)", |b| {
        b.iter(|| black_box(cache.total_memory_usage()));
    });

    group.bench_function("unload_unused (10k entries)", |b| {
        b.iter_batched(
            || filled_cache(10_000),
            |mut cache| black_box(cache.unload_unused()),
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_cache);
criterion_main!(benches);
