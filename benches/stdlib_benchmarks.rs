use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jscore::{Context, Value};

fn filled_array(ctx: &mut Context, n: i32) -> Value {
    Value::object(ctx.new_array_from((0..n).map(Value::int).collect()))
}

fn bench_array_push(c: &mut Criterion) {
    c.bench_function("array push 10k", |b| {
        b.iter(|| {
            let mut ctx = Context::new().unwrap();
            let arr = Value::object(ctx.new_array(0));
            for i in 0..10_000 {
                ctx.invoke(&arr, "push", &[Value::int(i)]).unwrap();
            }
            black_box(arr)
        })
    });
}

fn bench_array_join(c: &mut Criterion) {
    let mut ctx = Context::new().unwrap();
    let arr = filled_array(&mut ctx, 1_000);

    c.bench_function("array join 1k", |b| {
        b.iter(|| black_box(ctx.invoke(&arr, "join", &[]).unwrap()))
    });
}

fn bench_array_slice(c: &mut Criterion) {
    let mut ctx = Context::new().unwrap();
    let arr = filled_array(&mut ctx, 10_000);

    // Array receiver takes the block copy; an array-like takes the per-index path
    let like = ctx.new_plain_object();
    ctx.put(like, "length", Value::int(1_000)).unwrap();
    for i in 0..1_000 {
        ctx.put(like, &i.to_string(), Value::int(i)).unwrap();
    }
    let like = Value::object(like);

    c.bench_function("array slice 10k", |b| {
        b.iter(|| black_box(ctx.invoke(&arr, "slice", &[Value::int(1)]).unwrap()))
    });

    let slice = ctx.get(ctx.intrinsics().array_prototype, "slice").unwrap();
    c.bench_function("array-like slice 1k", |b| {
        b.iter(|| black_box(ctx.call(&slice, like.clone(), &[]).unwrap()))
    });
}

fn bench_array_concat(c: &mut Criterion) {
    let mut ctx = Context::new().unwrap();
    let a = filled_array(&mut ctx, 1_000);
    let b_arr = filled_array(&mut ctx, 1_000);

    c.bench_function("array concat 2x1k", |b| {
        b.iter(|| black_box(ctx.invoke(&a, "concat", &[b_arr.clone(), Value::int(0)]).unwrap()))
    });
}

fn bench_string_index_of(c: &mut Criterion) {
    let mut ctx = Context::new().unwrap();
    let ascii = Value::string("ab".repeat(5_000) + "needle");
    let wide = Value::string("日本😀".repeat(2_000) + "needle");

    c.bench_function("indexOf ascii", |b| {
        b.iter(|| {
            black_box(
                ctx.invoke(&ascii, "indexOf", &[Value::string("needle"), Value::int(100)])
                    .unwrap(),
            )
        })
    });
    c.bench_function("indexOf non-ascii", |b| {
        b.iter(|| {
            black_box(
                ctx.invoke(&wide, "indexOf", &[Value::string("needle"), Value::int(100)])
                    .unwrap(),
            )
        })
    });
}

fn bench_define_property(c: &mut Criterion) {
    c.bench_function("defineProperty 1k", |b| {
        b.iter(|| {
            let mut ctx = Context::new().unwrap();
            let global = ctx.global_object();
            let object = ctx.get(global, "Object").unwrap();
            let target = Value::object(ctx.new_plain_object());
            let desc = ctx.new_plain_object();
            ctx.put(desc, "value", Value::int(1)).unwrap();
            ctx.put(desc, "enumerable", Value::bool(true)).unwrap();
            let desc = Value::object(desc);
            for i in 0..1_000 {
                let args = [target.clone(), Value::int(i), desc.clone()];
                ctx.invoke(&object, "defineProperty", &args).unwrap();
            }
            black_box(target)
        })
    });
}

criterion_group!(
    benches,
    bench_array_push,
    bench_array_join,
    bench_array_slice,
    bench_array_concat,
    bench_string_index_of,
    bench_define_property,
);

criterion_main!(benches);
