use packed_bits::{BitVecError, BitVector, WORD_BITS};

fn main() -> Result<(), BitVecError> {
    println!("=== BitVector Examples ===\n");

    example_push_and_read()?;
    example_proxies()?;
    example_bulk_marking()?;
    example_memory_savings()?;

    Ok(())
}

fn example_push_and_read() -> Result<(), BitVecError> {
    println!("Example 1: Growing a vector one bit at a time");

    let mut bits = BitVector::new();
    for i in 0..70 {
        bits.push(i % 3 == 0)?;
    }

    println!("  Length:   {}", bits.len());
    println!("  Capacity: {} bits", bits.capacity());
    println!("  Ones:     {}", bits.count_ones());
    println!("  Bit 3: {}, bit 4: {}", bits[3], bits[4]);

    if let Err(err) = bits.get(70) {
        println!("  get(70): {err}");
    }
    println!();

    Ok(())
}

fn example_proxies() -> Result<(), BitVecError> {
    println!("Example 2: Writing through bit proxies");

    let mut bits = BitVector::with_len(8, false)?;
    bits.bit_mut(2)?.set(true);
    bits.bit_mut(5)?.flip();

    for (i, mut bit) in bits.iter_mut().enumerate() {
        if i % 4 == 3 {
            bit.set(true);
        }
    }
    println!("  {bits:?}");

    let trailing: Vec<bool> = bits.iter().rev().take(3).collect();
    println!("  Last three, reversed: {trailing:?}");
    println!();

    Ok(())
}

fn example_bulk_marking() -> Result<(), BitVecError> {
    println!("Example 3: Marking progressions and skipping runs");

    let mut bits = BitVector::with_len(200, false)?;
    bits.set_progression(0, 1, 100)?;
    bits.set_progression(101, 3, 30)?;

    println!("  First zero from 0:   {}", bits.skip_ones(0)?);
    println!("  First zero from 101: {}", bits.skip_ones(101)?);

    if let Err(err) = bits.set_progression(150, 10, 10) {
        println!("  Rejected: {err}");
    }
    println!();

    Ok(())
}

fn example_memory_savings() -> Result<(), BitVecError> {
    println!("Example 4: Memory savings comparison");

    let count = 10_000;
    let bits = BitVector::with_len(count, true)?;

    let standard_bytes = count * size_of::<bool>();
    let packed_bytes = bits.as_bytes().len();
    let savings = 100.0 * (1.0 - (packed_bytes as f64 / standard_bytes as f64));

    println!("  Storing {} flags in {}-bit words:", count, WORD_BITS);
    println!("  Vec<bool>: {} bytes", standard_bytes);
    println!("  Packed:    {} bytes", packed_bytes);
    println!("  Savings:   {:.1}%", savings);

    Ok(())
}
