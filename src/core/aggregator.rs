use crate::domain::model::{AccidentRecord, AccidentTable};
use crate::domain::ports::Accumulator;
use crate::utils::error::Result;

impl Accumulator for AccidentTable {
    // 依批次抵達順序附加，不去重也不排序
    fn accept(&mut self, records: Vec<AccidentRecord>) -> Result<()> {
        self.extend(records);
        Ok(())
    }

    fn len(&self) -> usize {
        AccidentTable::len(self)
    }
}
