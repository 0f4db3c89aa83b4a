use log::info;
use treap_map::treap::TreapMap;
use treap_map::Result;

fn main() -> Result<()> {
    env_logger::init();

    let mut t = TreapMap::new();
    for &(key, value) in &[(5, "a"), (3, "b"), (8, "c"), (1, "d"), (4, "e")] {
        t.set(key, value);
    }
    info!("ascending: {:?}", t.keys().collect::<Vec<&u32>>());
    info!("descending: {:?}", t.keys_rev().collect::<Vec<&u32>>());
    info!("get(5) = {:?}", t.get(&5)?);

    t.delete(&3)?;
    info!("after delete(3): {:?}, len = {}", t, t.len());

    let mut t = TreapMap::from_seed([1, 2, 3, 4]);
    for &key in &[10u32, 5, 15, 12, 18, 3] {
        t.set(key, key * 10);
    }
    info!("ascending: {:?}", t.keys().collect::<Vec<&u32>>());
    for &key in &[15, 10] {
        t.delete(&key)?;
        info!("after delete({}): {:?}", key, t.keys().collect::<Vec<&u32>>());
    }
    t.set(6, 60);
    info!("after set(6): {:?}", t.keys().collect::<Vec<&u32>>());
    t.delete(&6)?;
    info!("after delete(6): {:?}", t.keys().collect::<Vec<&u32>>());

    if let Err(err) = t.delete(&100) {
        info!("delete(100) failed: {}", err);
    }
    Ok(())
}
