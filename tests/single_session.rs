use fileservelib::server::{Mode, ResourceTableError};

mod common;

#[tokio::test]
async fn open_read_write_close() -> Result<(), Box<dyn std::error::Error>> {
    let table = common::_create_table(&[("a", "hello"), ("b", "world")]).await?;

    let reader = table.open("a", Mode::Readable).await?;
    assert_eq!(reader.read(), "hello");
    assert_eq!(table.status("a").await, Mode::Readable);
    table.close(&reader).await?;
    assert_eq!(table.status("a").await, Mode::Closed);

    let mut writer = table.open("a", Mode::ReadWrite).await?;
    assert_eq!(table.status("a").await, Mode::ReadWrite);
    writer.write("wibble")?;
    table.close(&writer).await?;

    let reader = table.open("a", Mode::Readable).await?;
    assert_eq!(reader.read(), "wibble");
    table.close(&reader).await?;

    //Reclosing the old writer must not change the state or the contents
    writer.write("plop")?;
    assert!(table.close(&writer).await.is_err());
    let reader = table.open("a", Mode::Readable).await?;
    assert_eq!(reader.read(), "wibble");
    table.close(&reader).await?;

    Ok(())
}

#[tokio::test]
async fn independent_writers() -> Result<(), Box<dyn std::error::Error>> {
    let table = common::_create_table(&[("a", "hello"), ("b", "world")]).await?;

    let mut fb = table.open("b", Mode::ReadWrite).await?;
    assert_eq!(fb.read(), "world");
    let mut fa = table.open("a", Mode::ReadWrite).await?;

    fb.write("wobble")?;
    table.close(&fb).await?;
    fa.write("waggle")?;
    table.close(&fa).await?;

    let fa2 = table.open("a", Mode::Readable).await?;
    let fb2 = table.open("b", Mode::Readable).await?;
    assert_eq!(fa2.read(), "waggle");
    assert_eq!(fb2.read(), "wobble");
    table.close(&fa2).await?;
    table.close(&fb2).await?;

    assert_eq!(table.status("a").await, Mode::Closed);
    assert_eq!(table.status("b").await, Mode::Closed);

    let res = table.close(&fa2).await;
    assert!(matches!(
        res,
        Err(ResourceTableError::ResourceControlError(_))
    ));
    assert_eq!(table.status("a").await, Mode::Closed);

    Ok(())
}

#[tokio::test]
async fn read_only_handles_refuse_writes() -> Result<(), Box<dyn std::error::Error>> {
    let table = common::_create_table(&[("a", "hello")]).await?;

    let mut reader = table.open("a", Mode::Readable).await?;
    assert!(reader.write("nope").is_err());
    table.close(&reader).await?;

    let reader = table.open("a", Mode::Readable).await?;
    assert_eq!(reader.read(), "hello");

    Ok(())
}

#[tokio::test]
async fn status_is_stable() -> Result<(), Box<dyn std::error::Error>> {
    let table = common::_create_table(&[("a", "hello")]).await?;
    let reader = table.open("a", Mode::Readable).await?;

    for _ in 0..10 {
        assert_eq!(table.status("a").await, Mode::Readable);
        assert_eq!(table.status("z").await, Mode::Unknown);
    }

    table.close(&reader).await?;
    Ok(())
}
