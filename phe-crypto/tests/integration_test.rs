use num_bigint::BigInt;
use phe_crypto::errors::PheError;
use phe_crypto::phe::{HeKit, KitConfig, SchemaType};
use phe_crypto::{Decryptor, Encryptor, Evaluator};

fn happy_flow(kit: &HeKit) -> Result<(), PheError> {
    let encryptor = kit.encryptor();
    let evaluator = kit.evaluator();
    let decryptor = kit.decryptor();

    let a = encryptor.encrypt(&BigInt::from(1_500))?;
    let b = encryptor.encrypt(&BigInt::from(-600))?;

    let mut acc = evaluator.add(&a, &b)?;
    evaluator.add_plain_inplace(&mut acc, &BigInt::from(100))?;
    evaluator.mul_inplace(&mut acc, &BigInt::from(-2))?;
    evaluator.sub_inplace(&mut acc, &b)?;
    let acc = evaluator.randomize(&acc)?;

    // (1500 - 600 + 100) * -2 + 600
    assert_eq!(decryptor.decrypt(&acc)?, BigInt::from(-1_400));

    let neg = evaluator.negate(&a)?;
    assert_eq!(decryptor.decrypt(&neg)?, BigInt::from(-1_500));
    Ok(())
}

#[test]
fn happy_flow_paillier() -> Result<(), PheError> {
    happy_flow(&HeKit::generate(SchemaType::Paillier, 1024)?)
}

#[test]
fn happy_flow_ou() -> Result<(), PheError> {
    happy_flow(&HeKit::generate(SchemaType::Ou, 1024)?)
}

#[test]
fn happy_flow_elgamal() -> Result<(), PheError> {
    let config = KitConfig {
        schema: SchemaType::ElGamal,
        elgamal_max_plaintext: 1 << 16,
        elgamal_table_bits: 8,
        ..KitConfig::default()
    };
    happy_flow(&HeKit::new(&config)?)
}

#[test]
fn in_place_matches_value_returning() -> Result<(), PheError> {
    let kit = HeKit::generate(SchemaType::Paillier, 512)?;
    let evaluator = kit.evaluator();
    let a = kit.encryptor().encrypt(&BigInt::from(11))?;
    let b = kit.encryptor().encrypt(&BigInt::from(31))?;

    let mut in_place = a.clone();
    evaluator.add_inplace(&mut in_place, &b)?;
    assert_eq!(in_place, evaluator.add(&a, &b)?);

    let mut in_place = a.clone();
    evaluator.sub_inplace(&mut in_place, &b)?;
    assert_eq!(in_place, evaluator.sub(&a, &b)?);

    let mut in_place = a.clone();
    evaluator.negate_inplace(&mut in_place)?;
    assert_eq!(in_place, evaluator.negate(&a)?);

    let mut in_place = a.clone();
    evaluator.mul_inplace(&mut in_place, &BigInt::from(-9))?;
    assert_eq!(in_place, evaluator.mul(&a, &BigInt::from(-9))?);

    let mut in_place = a.clone();
    evaluator.add_plain_inplace(&mut in_place, &BigInt::from(4))?;
    assert_eq!(in_place, evaluator.add_plain(&a, &BigInt::from(4))?);
    Ok(())
}

#[test]
fn domain_errors_leave_target_unchanged() -> Result<(), PheError> {
    let kit = HeKit::generate(SchemaType::Ou, 512)?;
    let evaluator = kit.evaluator();
    let mut acc = kit.encryptor().encrypt(&BigInt::from(8))?;
    let before = acc.clone();

    let huge = BigInt::from(1) << 4096u32;
    assert!(matches!(kit.encryptor().encrypt(&huge), Err(PheError::Domain(_))));
    assert!(matches!(
        evaluator.mul_inplace(&mut acc, &huge),
        Err(PheError::Domain(_))
    ));
    assert!(matches!(
        evaluator.add_plain_inplace(&mut acc, &-huge),
        Err(PheError::Domain(_))
    ));
    assert_eq!(acc, before);
    assert_eq!(kit.decryptor().decrypt(&acc)?, BigInt::from(8));
    Ok(())
}
