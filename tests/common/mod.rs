use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub fn catalog_csv(rows: &[(&str, &str, u64)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    {
        let mut wtr = csv::WriterBuilder::new().from_writer(file.as_file_mut());
        wtr.write_record(["product_code", "product_name", "product_price"])?;
        for (code, name, price) in rows {
            wtr.write_record([*code, *name, price.to_string().as_str()])?;
        }
        wtr.flush()?;
    }
    Ok(file)
}

pub fn scans_csv(codes: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "product_code")?;
    for code in codes {
        writeln!(file, "{code}")?;
    }
    file.flush()?;
    Ok(file)
}

pub fn sample_catalog() -> Result<NamedTempFile, Error> {
    catalog_csv(&[("A", "Apple", 1000), ("B", "Bread", 500), ("C", "Cheese", 999)])
}
